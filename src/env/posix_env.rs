use std::{
    cell::RefCell,
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use chrono::Local;

use super::{Env, Logger, SequentialFile, WritableFile};
use crate::util::{Result, VdrError};

/// `Env` backed by the local filesystem through `std::fs`.
pub struct PosixEnv {}

impl PosixEnv {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PosixEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Env for PosixEnv {
    fn new_sequential_file(&self, fname: &str) -> Result<Box<dyn SequentialFile>> {
        match File::open(fname) {
            Ok(file) => Ok(Box::new(PosixSequentialFile { file })),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn new_writable_file(&self, fname: &str) -> Result<Box<dyn WritableFile>> {
        match File::create(fname) {
            Ok(file) => Ok(Box::new(PosixWritableFile::new(file))),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn new_appendable_file(&self, fname: &str) -> Result<Box<dyn WritableFile>> {
        match OpenOptions::new().append(true).open(fname) {
            Ok(file) => Ok(Box::new(PosixWritableFile::new(file))),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn truncate_file(&self, fname: &str, size: u64) -> Result<()> {
        let file = match OpenOptions::new().write(true).open(fname) {
            Ok(file) => file,
            Err(error) => return Err(to_vdr_error(fname, error)),
        };
        match file.set_len(size) {
            Ok(()) => Ok(()),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn file_exists(&self, fname: &str) -> bool {
        Path::new(fname).exists()
    }

    fn get_file_size(&self, fname: &str) -> Result<u64> {
        match fs::metadata(fname) {
            Ok(data) => Ok(data.len()),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn remove_file(&self, fname: &str) -> Result<()> {
        match fs::remove_file(fname) {
            Ok(()) => Ok(()),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }

    fn new_logger(&self, fname: &str) -> Result<Box<dyn Logger>> {
        match OpenOptions::new().create(true).append(true).open(fname) {
            Ok(file) => Ok(Box::new(PosixLogger::new(file))),
            Err(error) => Err(to_vdr_error(fname, error)),
        }
    }
}

fn to_vdr_error(target: &str, error: io::Error) -> VdrError {
    VdrError::Io(format!("{}: {}", target, error))
}

struct PosixSequentialFile {
    file: File,
}

impl SequentialFile for PosixSequentialFile {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        self.file
            .read(dst)
            .map_err(|error| to_vdr_error("read", error))
    }
}

struct PosixWritableFile {
    writer: BufWriter<File>,
}

impl PosixWritableFile {
    fn new(file: File) -> Self {
        Self {
            writer: BufWriter::new(file),
        }
    }
}

impl WritableFile for PosixWritableFile {
    fn append(&mut self, data: &[u8]) -> Result<()> {
        self.writer
            .write_all(data)
            .map_err(|error| to_vdr_error("append", error))
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|error| to_vdr_error("flush", error))
    }

    fn sync(&mut self) -> Result<()> {
        self.flush()?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|error| to_vdr_error("sync", error))
    }
}

struct PosixLogger {
    file: RefCell<File>,
}

impl PosixLogger {
    fn new(file: File) -> Self {
        Self {
            file: RefCell::new(file),
        }
    }
}

impl Logger for PosixLogger {
    fn log(&self, info: &str) {
        // Record the time as close to the log call as possible.
        let time = Local::now().format("%Y/%m/%d-%H:%M:%S%.6f");
        let mut file = self.file.borrow_mut();
        let _ = writeln!(file, "{} {}", time, info);
        let _ = file.flush();
    }
}
