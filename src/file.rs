//! VDR file assembler: composes header, speed table, and log stream into a
//! whole file and performs the reverse parse, plus the on-disk lifecycle
//! (create, append, read) through an [`Env`].

use crate::{
    env::{write_data_to_file_sync, Env},
    format::{LogEntry, SpeedEntry, VdrHeader, TERMINATOR},
    header::encode_header,
    log::{encode_record, Reader, Writer},
    util::Result,
};

/// File name the interactive tool writes.
pub const DEFAULT_FILE_NAME: &str = "voyage_data_recorder.dat";

/// Full in-memory representation of a recorder file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdrFile {
    pub header: VdrHeader,
    pub entries: Vec<LogEntry>,
}

impl VdrFile {
    /// Encode the whole file: header section, log records in append order,
    /// log terminator.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut dst = encode_header(
            &self.header.ship_name,
            self.header.imo_number,
            &self.header.speed_table,
        )?;
        for entry in &self.entries {
            dst.extend_from_slice(&encode_record(entry.timestamp, entry.kind, &entry.payload)?);
        }
        dst.extend_from_slice(&TERMINATOR);
        Ok(dst)
    }

    /// Parse a complete file. The input must end exactly at the log
    /// terminator.
    pub fn decode(input: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_bytes(input.to_vec())?;
        let mut entries = vec![];
        while let Some(entry) = reader.read_record()? {
            entries.push(entry);
        }
        Ok(Self {
            header: reader.header().clone(),
            entries,
        })
    }
}

/// Create a fresh recorder file: header, speed table, and an empty log
/// stream. Synced before returning; a failed write removes the partial file.
pub fn create(
    env: &dyn Env,
    fname: &str,
    ship_name: &str,
    imo_number: u32,
    speed_table: &[SpeedEntry],
) -> Result<()> {
    let mut data = encode_header(ship_name, imo_number, speed_table)?;
    data.extend_from_slice(&TERMINATOR);
    write_data_to_file_sync(env, &data, fname)
}

/// Read and fully validate a recorder file.
pub fn read(env: &dyn Env, fname: &str) -> Result<VdrFile> {
    let mut reader = Reader::new(env.new_sequential_file(fname)?)?;
    let mut entries = vec![];
    while let Some(entry) = reader.read_record()? {
        entries.push(entry);
    }
    Ok(VdrFile {
        header: reader.header().clone(),
        entries,
    })
}

/// Open an existing file for appending log records.
///
/// The whole file is validated first, then the trailing log terminator is cut
/// off and the returned [`Writer`] continues the stream from that position;
/// its `finish` re-writes the terminator. Single writer only.
pub fn open_append(env: &dyn Env, fname: &str) -> Result<Writer> {
    read(env, fname)?;
    let size = env.get_file_size(fname)?;
    env.truncate_file(fname, size - TERMINATOR.len() as u64)?;
    Ok(Writer::new(env.new_appendable_file(fname)?))
}
