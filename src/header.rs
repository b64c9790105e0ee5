//! Header codec: magic, version, vessel identity, speed table, terminator.

use crate::{
    format::{SpeedEntry, VdrHeader, HEADER_PREFIX_SIZE, MAGIC, SHIP_NAME_SIZE, TERMINATOR, VERSION},
    speed::{decode_speed_table, encode_speed_table},
    util::{decode_fixed32, decode_text, extend_fixed32, extend_text, Result, VdrError},
};

/// Encode the full header section, terminator included.
///
/// The interactive front end validates the ship name and IMO number before
/// calling in; the checks here are the safety net for other callers.
pub fn encode_header(
    ship_name: &str,
    imo_number: u32,
    speed_table: &[SpeedEntry],
) -> Result<Vec<u8>> {
    if imo_number == 0 {
        return Err(VdrError::invalid_input("IMO number must be positive"));
    }
    let mut dst = Vec::with_capacity(HEADER_PREFIX_SIZE);
    dst.extend_from_slice(&MAGIC);
    dst.push(VERSION);
    extend_text(&mut dst, ship_name, SHIP_NAME_SIZE)?;
    extend_fixed32(&mut dst, imo_number);
    dst.extend_from_slice(&encode_speed_table(speed_table)?);
    dst.extend_from_slice(&TERMINATOR);
    Ok(dst)
}

/// Decode the header section. Returns the header plus the offset immediately
/// past the header terminator, where the log stream begins.
pub fn decode_header(input: &[u8]) -> Result<(VdrHeader, usize)> {
    if input.len() < HEADER_PREFIX_SIZE {
        return Err(VdrError::truncated("header shorter than its fixed prefix"));
    }
    if input[..MAGIC.len()] != MAGIC {
        return Err(VdrError::UnrecognizedFormat(format!(
            "bad magic {:02x?}",
            &input[..MAGIC.len()]
        )));
    }
    let version = input[4];
    if version != VERSION {
        return Err(VdrError::UnsupportedVersion(version));
    }
    let ship_name = decode_text(&input[5..5 + SHIP_NAME_SIZE]);
    let imo_number = decode_fixed32(&input[5 + SHIP_NAME_SIZE..]);
    let (speed_table, offset) = decode_speed_table(input, HEADER_PREFIX_SIZE)?;
    if input.len() < offset + TERMINATOR.len() {
        return Err(VdrError::truncated("missing header terminator"));
    }
    if input[offset..offset + TERMINATOR.len()] != TERMINATOR {
        return Err(VdrError::malformed_header(
            "speed table not followed by terminator",
        ));
    }
    let header = VdrHeader {
        version,
        ship_name,
        imo_number,
        speed_table,
    };
    Ok((header, offset + TERMINATOR.len()))
}
