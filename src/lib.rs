mod env;
mod file;
mod format;
mod header;
mod log;
mod speed;
mod util;

pub use env::{Env, Logger, PosixEnv, SequentialFile, WritableFile};
pub use file::{create, open_append, read, VdrFile, DEFAULT_FILE_NAME};
pub use format::{
    default_speed_table, EventKind, LogEntry, SpeedEntry, VdrHeader, MAGIC, MAX_PAYLOAD_SIZE,
    MAX_SPEED_ENTRIES, SHIP_NAME_SIZE, TERMINATOR, VERSION,
};
pub use header::{decode_header, encode_header};
pub use log::{decode_record, encode_record, Reader, Writer};
pub use speed::{decode_speed_table, encode_speed_table};
pub use util::{Result, VdrError};
