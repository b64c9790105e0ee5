//! Speed table codec: 1-byte count, then knots + padded name per entry.

use crate::{
    format::{SpeedEntry, MAX_SPEED_ENTRIES, SPEED_ENTRY_SIZE, SPEED_NAME_SIZE},
    util::{decode_text, extend_text, Result, VdrError},
};

/// Encode the table in input order. Fails with `TooManyEntries` above 255
/// entries and `InvalidInput` for an empty or over-width name.
pub fn encode_speed_table(entries: &[SpeedEntry]) -> Result<Vec<u8>> {
    if entries.len() > MAX_SPEED_ENTRIES {
        return Err(VdrError::TooManyEntries(entries.len()));
    }
    let mut dst = Vec::with_capacity(1 + entries.len() * SPEED_ENTRY_SIZE);
    dst.push(entries.len() as u8);
    for entry in entries {
        dst.push(entry.knots);
        extend_text(&mut dst, &entry.name, SPEED_NAME_SIZE)?;
    }
    Ok(dst)
}

/// Decode the table starting at `offset`. Returns the entries plus the offset
/// immediately past the table, for the caller to continue parsing.
pub fn decode_speed_table(input: &[u8], offset: usize) -> Result<(Vec<SpeedEntry>, usize)> {
    let count = *input
        .get(offset)
        .ok_or_else(|| VdrError::truncated("missing speed table count"))? as usize;
    let mut offset = offset + 1;
    if input.len() < offset + count * SPEED_ENTRY_SIZE {
        return Err(VdrError::Truncated(format!(
            "speed table declares {count} entries, {} bytes remain",
            input.len() - offset
        )));
    }
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(SpeedEntry {
            knots: input[offset],
            name: decode_text(&input[offset + 1..offset + SPEED_ENTRY_SIZE]),
        });
        offset += SPEED_ENTRY_SIZE;
    }
    Ok((entries, offset))
}
