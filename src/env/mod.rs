use crate::util::Result;

mod posix_env;

pub use posix_env::PosixEnv;

/// Interface between the codec and operating system functionality. Callers
/// may provide their own Env to keep recorder files somewhere other than the
/// local filesystem.
///
/// The recorder model is single-writer: nothing here takes a lock, and the
/// truncate-then-append pattern used for the log terminator is not safe under
/// concurrent mutation.
pub trait Env {
    /// The returned file will only be accessed by one thread at a time.
    fn new_sequential_file(&self, fname: &str) -> Result<Box<dyn SequentialFile>>;

    /// Creates or truncates `fname`.
    fn new_writable_file(&self, fname: &str) -> Result<Box<dyn WritableFile>>;

    /// Opens `fname` positioned at its current end.
    fn new_appendable_file(&self, fname: &str) -> Result<Box<dyn WritableFile>>;

    /// Cuts `fname` down to `size` bytes.
    fn truncate_file(&self, fname: &str, size: u64) -> Result<()>;

    fn file_exists(&self, fname: &str) -> bool;
    fn get_file_size(&self, fname: &str) -> Result<u64>;
    fn remove_file(&self, fname: &str) -> Result<()>;
    fn new_logger(&self, fname: &str) -> Result<Box<dyn Logger>>;
}

/// A file abstraction for reading sequentially through a file.
pub trait SequentialFile {
    /// Reads up to `dst.len()` bytes; 0 means end of file.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize>;
}

/// A file abstraction for sequential writing. The implementation must provide
/// buffering since callers may append small fragments at a time to the file.
pub trait WritableFile {
    fn append(&mut self, data: &[u8]) -> Result<()>;
    fn close(&mut self) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn sync(&mut self) -> Result<()>;
}

/// Info-log sink for operational messages, not part of the recorder format.
pub trait Logger {
    fn log(&self, info: &str);
}

/// Write `data` to a fresh `fname`, synced. A failed write removes the
/// partial file.
pub fn write_data_to_file_sync(env: &dyn Env, data: &[u8], fname: &str) -> Result<()> {
    let mut file = env.new_writable_file(fname)?;
    let mut result = file.append(data);
    if result.is_ok() {
        result = file.sync();
    }
    if result.is_ok() {
        result = file.close();
    }
    drop(file);
    if result.is_err() {
        let _ = env.remove_file(fname);
    }
    result
}
