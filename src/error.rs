//! error — ошибки чтения контейнера.
//!
//! Конец контейнера ошибкой не считается; всё остальное — вариант RecordError.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which checksummed field of a frame failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumField {
    Length,
    Payload,
}

impl fmt::Display for ChecksumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumField::Length => f.write_str("length"),
            ChecksumField::Payload => f.write_str("payload"),
        }
    }
}

/// Errors surfaced by the container, cursor and byte source.
///
/// End-of-container is not an error: streams simply stop yielding items and
/// `index()` returns the offsets collected so far.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The container path does not exist.
    #[error("container not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The container path exists but cannot be opened for reading.
    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// A frame claims more bytes than remain in the file.
    #[error("truncated frame at offset {offset}: needs {needed} bytes, file is {file_len} bytes")]
    Truncated {
        offset: u64,
        needed: u64,
        file_len: u64,
    },

    /// Stored masked CRC disagrees with the recomputed one.
    #[error("{field} checksum mismatch at offset {offset}: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        offset: u64,
        field: ChecksumField,
        stored: u32,
        computed: u32,
    },

    /// Operation on a closed handle, or a resume offset that is not a frame boundary.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The injected payload decoder rejected the bytes of a frame.
    #[error("decode failed for frame at offset {offset}: {source}")]
    Decode {
        offset: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RecordError {
    /// Map an `open()` failure onto the open-time variants.
    pub(crate) fn from_open(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => RecordError::NotFound { path },
            io::ErrorKind::PermissionDenied => RecordError::PermissionDenied { path },
            _ => RecordError::Io(err),
        }
    }

    /// True for data corruption (truncation or checksum failure).
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RecordError::Truncated { .. } | RecordError::ChecksumMismatch { .. }
        )
    }
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, RecordError>;
