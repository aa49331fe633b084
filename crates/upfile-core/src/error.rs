//! Error types for uploaded file handling.

use std::io;
use std::path::PathBuf;

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::code::UploadErrorCode;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = UploadError> = std::result::Result<T, E>;

/// Categories of errors that can occur while handling an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The stream handed to the constructor is not a valid upload.
    ConstructionInvalid,
    /// The stream is gone: moved away, or invalidated since construction.
    StreamUnavailable,
    /// The file has already been moved.
    AlreadyMoved,
    /// The upload failed on the client or server side and cannot be moved.
    CannotMove,
    /// The move target is empty or its directory is unusable.
    InvalidArgument,
    /// The operating system rejected the move.
    MoveFailed,
}

/// Reasons a stream fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// No regular file exists behind the stream.
    #[error("stream underlying file does not exist: {}", .path.display())]
    FileMissing { path: PathBuf },
    /// The stream was not opened for reading.
    #[error("stream is not readable")]
    NotReadable,
    /// The backing file was not produced by an upload.
    #[error("stream is not an uploaded file: {}", .path.display())]
    NotAnUpload { path: PathBuf },
    /// The backing file has been moved away.
    #[error("file has already been moved to {}", .target.display())]
    Moved { target: PathBuf },
}

/// Reasons a move target is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The target path is empty.
    #[error("target path is empty")]
    EmptyPath,
    /// The target's parent is missing or not a directory.
    #[error("directory {} does not exist", .dir.display())]
    TargetDirMissing { dir: PathBuf },
    /// This process cannot write into the target's parent.
    #[error("directory {} is not writable", .dir.display())]
    TargetDirNotWritable { dir: PathBuf },
}

/// A numeric upload code outside the platform numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown upload error code [{0}]")]
pub struct UnknownErrorCode(pub i32);

/// Errors returned by [`UploadedFile`](crate::UploadedFile) operations.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The stream failed validation at construction.
    #[error("stream is not valid")]
    InvalidUpload(#[source] StreamError),
    /// The stream failed validation on access.
    #[error("no stream is available")]
    StreamUnavailable(#[source] StreamError),
    /// A second move was attempted.
    #[error("file has already been moved")]
    AlreadyMoved,
    /// The upload carries a non-OK code.
    #[error("uploaded file cannot be moved with error [{reason}]")]
    CannotMove {
        code: UploadErrorCode,
        reason: &'static str,
    },
    /// The move target was rejected before touching the filesystem.
    #[error("target path is invalid")]
    InvalidArgument(#[source] TargetError),
    /// The move primitive failed.
    #[error("file moving failed")]
    MoveFailed(#[source] io::Error),
}

impl UploadError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUpload(_) => ErrorKind::ConstructionInvalid,
            Self::StreamUnavailable(_) => ErrorKind::StreamUnavailable,
            Self::AlreadyMoved => ErrorKind::AlreadyMoved,
            Self::CannotMove { .. } => ErrorKind::CannotMove,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::MoveFailed(_) => ErrorKind::MoveFailed,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns `true` if the failure was caused by an earlier successful move.
    pub fn is_already_moved(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMoved | Self::StreamUnavailable(StreamError::Moved { .. })
        )
    }
}
