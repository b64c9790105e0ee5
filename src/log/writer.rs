use super::encode_record;
use crate::{
    env::WritableFile,
    format::{EventKind, TERMINATOR},
    util::{Result, VdrError},
};

/// Appends log records to a destination positioned where the previous log
/// terminator began, then re-writes the terminator on `finish`.
///
/// The terminator must never appear mid-stream, so `finish` must run before
/// the destination is handed to anyone else; a writer dropped without it
/// leaves the file without an end-of-log marker.
pub struct Writer {
    dest: Box<dyn WritableFile>,
    finished: bool,
}

impl Writer {
    pub fn new(dest: Box<dyn WritableFile>) -> Self {
        Self {
            dest,
            finished: false,
        }
    }

    /// Encode and append one record. Each record is flushed so a crash loses
    /// at most the terminator, never a record boundary.
    pub fn add_record(&mut self, timestamp: u32, kind: EventKind, payload: &[u8]) -> Result<()> {
        if self.finished {
            return Err(VdrError::invalid_input(
                "writer already finished its log section",
            ));
        }
        let record = encode_record(timestamp, kind, payload)?;
        self.dest.append(&record)?;
        self.dest.flush()
    }

    /// Write the log terminator, sync, and close the destination.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.dest.append(&TERMINATOR)?;
        self.dest.sync()?;
        self.dest.close()
    }
}
