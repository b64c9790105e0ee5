//! 1-byte XOR checksum over log record bytes. This is the format's only
//! corruption detector: flipping any single bit of a covered byte flips the
//! same bit of the checksum.

pub fn extend(init: u8, data: &[u8]) -> u8 {
    data.iter().fold(init, |acc, &byte| acc ^ byte)
}

pub fn value(data: &[u8]) -> u8 {
    extend(0, data)
}
