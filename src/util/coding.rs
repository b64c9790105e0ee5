use std::mem::size_of;

use crate::util::{Result, VdrError};

pub fn encode_fixed32(dst: &mut [u8], value: u32) {
    dst[..size_of::<u32>()].copy_from_slice(&value.to_le_bytes());
}

pub fn decode_fixed32(input: &[u8]) -> u32 {
    let (bytes, _) = input.split_at(size_of::<u32>());
    u32::from_le_bytes(bytes.try_into().unwrap())
}

pub fn extend_fixed32(dst: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; size_of::<u32>()];
    encode_fixed32(&mut buf, value);
    dst.extend_from_slice(&buf);
}

/// Append `text` as a fixed-width field: ASCII upper-cased and right-padded
/// with spaces to exactly `width` bytes.
///
/// Empty and over-width input are rejected, never truncated. Width checks use
/// byte length, since the on-disk field is byte-sized.
pub fn extend_text(dst: &mut Vec<u8>, text: &str, width: usize) -> Result<()> {
    if text.is_empty() {
        return Err(VdrError::invalid_input("text field must not be empty"));
    }
    if text.len() > width {
        return Err(VdrError::InvalidInput(format!(
            "text field is {} bytes, field width is {width}",
            text.len()
        )));
    }
    let upper = text.to_ascii_uppercase();
    dst.extend_from_slice(upper.as_bytes());
    dst.resize(dst.len() + width - upper.len(), b' ');
    Ok(())
}

/// Decode a fixed-width text field by stripping trailing spaces. Never fails;
/// non-UTF-8 bytes degrade to replacement characters.
pub fn decode_text(input: &[u8]) -> String {
    let end = input
        .iter()
        .rposition(|&byte| byte != b' ')
        .map_or(0, |index| index + 1);
    String::from_utf8_lossy(&input[..end]).into_owned()
}
