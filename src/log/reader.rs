use super::decode_record;
use crate::{
    env::SequentialFile,
    format::{LogEntry, VdrHeader, TERMINATOR},
    header::decode_header,
    util::{Result, VdrError},
};

/// Read buffer granularity when draining a sequential file.
const READ_CHUNK_SIZE: usize = 4096;

/// Reads a recorder file: header first, then one record per call until the
/// log terminator. Every decode error is surfaced to the caller; a corrupted
/// log is never silently repaired.
pub struct Reader {
    buf: Vec<u8>,
    header: VdrHeader,
    offset: usize,
    eof: bool,
}

impl Reader {
    /// Drain `file` and decode the header eagerly, so a file with a bad
    /// magic or version fails here rather than on the first record read.
    pub fn new(mut file: Box<dyn SequentialFile>) -> Result<Self> {
        let mut buf = vec![];
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            let read_size = file.read(&mut chunk)?;
            if read_size == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..read_size]);
        }
        Self::from_bytes(buf)
    }

    pub fn from_bytes(buf: Vec<u8>) -> Result<Self> {
        let (header, offset) = decode_header(&buf)?;
        Ok(Self {
            buf,
            header,
            offset,
            eof: false,
        })
    }

    pub fn header(&self) -> &VdrHeader {
        &self.header
    }

    /// Next record, or `None` once the log terminator is reached. The file
    /// must end exactly at that terminator.
    pub fn read_record(&mut self) -> Result<Option<LogEntry>> {
        if self.eof {
            return Ok(None);
        }
        match decode_record(&self.buf, self.offset)? {
            Some((entry, next_offset)) => {
                self.offset = next_offset;
                Ok(Some(entry))
            }
            None => {
                let end = self.offset + TERMINATOR.len();
                if end != self.buf.len() {
                    return Err(VdrError::MalformedHeader(format!(
                        "{} trailing bytes after the log terminator",
                        self.buf.len() - end
                    )));
                }
                self.eof = true;
                Ok(None)
            }
        }
    }
}
