//! On-disk constants and data model for the AVDR file format.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! Header:     "AVDR"(4) | version(1) | shipName(32, space-padded, upper) | imoNumber(4, u32le)
//! Speed tbl:  count(1) | [knots(1) | name(7, space-padded, upper)] * count
//! Terminator: FF FF FF FF
//! Log stream: [timestamp(4, u32le) | kind+length(1) | payload | checksum(1)] *
//! Terminator: FF FF FF FF
//! ```
//!
//! The kind/length byte split is a frozen configuration constant: changing it
//! breaks compatibility with every file already written.

/// File magic, "AVDR".
pub const MAGIC: [u8; 4] = *b"AVDR";

/// Current and only supported on-disk format version.
pub const VERSION: u8 = 1;

/// Sentinel closing a variable-length section: once after the speed table,
/// once after the last log record.
pub const TERMINATOR: [u8; 4] = [0xff; 4];

pub const SHIP_NAME_SIZE: usize = 32;
pub const SPEED_NAME_SIZE: usize = 7;

/// Knots byte plus padded name.
pub const SPEED_ENTRY_SIZE: usize = 1 + SPEED_NAME_SIZE;

/// The speed table count field is a single byte.
pub const MAX_SPEED_ENTRIES: usize = 255;

/// Fixed header prefix: magic(4) + version(1) + name(32) + imo(4).
pub const HEADER_PREFIX_SIZE: usize = 41;

/// High bits of the kind/length byte select the event kind.
pub const KIND_BITS: u32 = 3;

/// Low bits carry the payload length.
pub const LEN_BITS: u32 = 8 - KIND_BITS;

/// Largest payload a single record can carry. Larger events must be split
/// across records.
pub const MAX_PAYLOAD_SIZE: usize = (1 << LEN_BITS) - 1;

/// Event kind carried in the high bits of the kind/length byte.
///
/// All eight code points are assigned, so every byte value decodes to a valid
/// kind. The meaning of each kind's payload is application-defined; the codec
/// treats payloads as opaque bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum EventKind {
    Note = 0,
    Position = 1,
    SpeedChange = 2,
    HeadingChange = 3,
    EngineStatus = 4,
    Alarm = 5,
    Weather = 6,
    Custom = 7,
}

impl From<u8> for EventKind {
    fn from(value: u8) -> Self {
        match value & ((1 << KIND_BITS) - 1) {
            0 => Self::Note,
            1 => Self::Position,
            2 => Self::SpeedChange,
            3 => Self::HeadingChange,
            4 => Self::EngineStatus,
            5 => Self::Alarm,
            6 => Self::Weather,
            _ => Self::Custom,
        }
    }
}

/// Pack an event kind and payload length into the single record byte.
/// Callers must have bounded `len` already; `encode_record` is the only
/// encode path and rejects oversized payloads before packing.
pub(crate) fn pack_kind_len(kind: EventKind, len: usize) -> u8 {
    debug_assert!(len <= MAX_PAYLOAD_SIZE);
    (kind as u8) << LEN_BITS | len as u8
}

/// Split the record byte back into kind and payload length.
pub(crate) fn unpack_kind_len(byte: u8) -> (EventKind, usize) {
    let kind = (byte >> LEN_BITS).into();
    let len = (byte & MAX_PAYLOAD_SIZE as u8) as usize;
    (kind, len)
}

/// One named speed setting. Table order is operator intent and is preserved
/// verbatim; neither knots nor names are required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedEntry {
    pub knots: u8,
    pub name: String,
}

impl SpeedEntry {
    pub fn new(knots: u8, name: &str) -> Self {
        Self {
            knots,
            name: name.to_owned(),
        }
    }
}

/// One timestamped log record. Immutable once written; the stream only ever
/// grows by append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unix seconds. `u32::MAX` is unrepresentable: it would read back as the
    /// stream terminator.
    pub timestamp: u32,
    pub kind: EventKind,
    pub payload: Vec<u8>,
}

impl LogEntry {
    pub fn new(timestamp: u32, kind: EventKind, payload: &[u8]) -> Self {
        Self {
            timestamp,
            kind,
            payload: payload.to_vec(),
        }
    }
}

/// Decoded file header. Fixed for the lifetime of a recorder file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdrHeader {
    pub version: u8,
    pub ship_name: String,
    pub imo_number: u32,
    pub speed_table: Vec<SpeedEntry>,
}

/// The stock engine-order telegraph table written by the interactive tool.
/// Callers may pass any other table to the assembler instead.
pub fn default_speed_table() -> Vec<SpeedEntry> {
    vec![
        SpeedEntry::new(2, "DEADSLW"),
        SpeedEntry::new(5, "SLOW"),
        SpeedEntry::new(10, "HALF"),
        SpeedEntry::new(20, "FULL"),
        SpeedEntry::new(22, "FLANK"),
    ]
}
