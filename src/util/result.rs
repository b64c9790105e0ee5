use thiserror::Error;

/// Errors produced by the AVDR codec and its file plumbing.
///
/// Encode-time errors (`InvalidInput`, `TooManyEntries`, `PayloadTooLarge`)
/// mean the caller must fix its input. Decode-time errors are fatal to the
/// file being read: a corrupted recorder log is never silently repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VdrError {
    #[error("InvalidInput: {0}")]
    InvalidInput(String),

    #[error("UnrecognizedFormat: {0}")]
    UnrecognizedFormat(String),

    #[error("UnsupportedVersion: version {0}")]
    UnsupportedVersion(u8),

    #[error("Truncated: {0}")]
    Truncated(String),

    #[error("ChecksumMismatch: stored {stored:#04x}, computed {computed:#04x}")]
    ChecksumMismatch { stored: u8, computed: u8 },

    #[error("TooManyEntries: {0} speed entries (max 255)")]
    TooManyEntries(usize),

    #[error("PayloadTooLarge: {got} bytes (max {max})")]
    PayloadTooLarge { got: usize, max: usize },

    #[error("MalformedHeader: {0}")]
    MalformedHeader(String),

    #[error("IOError: {0}")]
    Io(String),
}

impl VdrError {
    pub fn invalid_input(msg: &str) -> Self {
        Self::InvalidInput(msg.to_owned())
    }

    pub fn truncated(msg: &str) -> Self {
        Self::Truncated(msg.to_owned())
    }

    pub fn malformed_header(msg: &str) -> Self {
        Self::MalformedHeader(msg.to_owned())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated(_))
    }

    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }

    /// True for any decode-time error that marks the file itself as bad.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFormat(_)
                | Self::UnsupportedVersion(_)
                | Self::Truncated(_)
                | Self::ChecksumMismatch { .. }
                | Self::MalformedHeader(_)
        )
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, VdrError>;
