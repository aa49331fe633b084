//! The uploaded file value object.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use faccess::PathExt;

use crate::TRACING_TARGET_FILE;
use crate::code::UploadErrorCode;
use crate::config::UploadContext;
use crate::error::{Result, StreamError, TargetError, UploadError};
use crate::file::UploadMetadata;
use crate::mode::RuntimeMode;
use crate::stream::{FileStream, UploadStream};

/// Lifecycle of the backing file. `Moved` is terminal.
#[derive(Debug)]
enum MoveState<S> {
    /// The stream is owned and its file is still in the upload location.
    Pending(S),
    /// The file now lives at `target`; the stream has been released.
    Moved { target: PathBuf },
}

/// One uploaded file: its client metadata, its outcome code, a readable
/// stream over its content, and a one-shot move to a final destination.
///
/// The stream is validated at construction and again on every access before
/// the move: its backing file must exist, the stream must be readable, and
/// the [`UploadContext`] must recognize the file as a genuine upload.
///
/// # Example
///
/// ```no_run
/// use upfile_core::stream::{AccessMode, FileStream};
/// use upfile_core::{UploadConfig, UploadContext, UploadMetadata, UploadedFile};
///
/// fn handle() -> Result<(), Box<dyn std::error::Error>> {
///     let config = UploadConfig::default().with_upload_dir("/var/tmp/uploads");
///     let context = UploadContext::from_config(&config);
///
///     let stream = FileStream::open("/var/tmp/uploads/upl3f2a", AccessMode::Read)?;
///     let metadata = UploadMetadata::new().with_client_filename("avatar.png");
///
///     let mut upload = UploadedFile::new(stream, metadata, &context)?;
///     upload.move_to("/srv/media/avatar.png")?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct UploadedFile<S = FileStream> {
    state: MoveState<S>,
    size: Option<u64>,
    error: UploadErrorCode,
    client_filename: Option<String>,
    client_media_type: Option<String>,
    context: UploadContext,
}

impl<S: UploadStream> UploadedFile<S> {
    /// Creates an uploaded file, validating its stream.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidUpload`] if the stream's file is missing,
    /// the stream is not readable, or the file is not a genuine upload.
    pub fn new(stream: S, metadata: UploadMetadata, context: &UploadContext) -> Result<Self> {
        validate_stream(&stream, context).map_err(|err| {
            tracing::debug!(
                target: TRACING_TARGET_FILE,
                error = %err,
                "rejected upload stream"
            );
            UploadError::InvalidUpload(err)
        })?;

        let upload = Self {
            state: MoveState::Pending(stream),
            size: metadata
                .size
                .and_then(|size| u64::try_from(size).ok())
                .filter(|&size| size > 0),
            error: metadata.error,
            client_filename: metadata.client_filename.filter(|name| !name.is_empty()),
            client_media_type: metadata.client_media_type.filter(|kind| !kind.is_empty()),
            context: context.clone(),
        };

        tracing::debug!(
            target: TRACING_TARGET_FILE,
            size = ?upload.size,
            error = %upload.error,
            client_filename = ?upload.client_filename,
            runtime_mode = %upload.context.runtime_mode(),
            "created uploaded file"
        );

        Ok(upload)
    }

    /// Returns the stream over the uploaded content.
    ///
    /// Repeated calls return the same stream until the file is moved.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::StreamUnavailable`] if the file has been moved,
    /// or if the stream no longer passes validation.
    pub fn stream(&self) -> Result<&S> {
        let stream = match &self.state {
            MoveState::Pending(stream) => stream,
            MoveState::Moved { target } => {
                return Err(UploadError::StreamUnavailable(StreamError::Moved {
                    target: target.clone(),
                }));
            }
        };

        validate_stream(stream, &self.context).map_err(UploadError::StreamUnavailable)?;
        Ok(stream)
    }

    /// Moves the uploaded file to `target_path`.
    ///
    /// Checks run in order and the first failure wins: the upload outcome
    /// must be OK, the file must not have been moved, the target must be
    /// non-empty and its directory must exist and be writable. The file is
    /// marked as moved only once the move primitive succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::CannotMove`], [`UploadError::AlreadyMoved`],
    /// [`UploadError::InvalidArgument`] or [`UploadError::MoveFailed`].
    pub fn move_to(&mut self, target_path: impl AsRef<Path>) -> Result<()> {
        let target_path = target_path.as_ref();

        if !self.error.is_ok() {
            return Err(UploadError::CannotMove {
                code: self.error,
                reason: self.error.message(),
            });
        }

        let MoveState::Pending(stream) = &self.state else {
            return Err(UploadError::AlreadyMoved);
        };

        if target_path.as_os_str().is_empty() {
            return Err(UploadError::InvalidArgument(TargetError::EmptyPath));
        }

        check_target_dir(target_path).map_err(UploadError::InvalidArgument)?;

        let source = stream.uri().map(Path::to_path_buf).unwrap_or_default();
        self.move_stream(&source, target_path).map_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET_FILE,
                source = %source.display(),
                target = %target_path.display(),
                error = %err,
                "failed to move uploaded file"
            );
            UploadError::MoveFailed(err)
        })?;

        tracing::info!(
            target: TRACING_TARGET_FILE,
            source = %source.display(),
            target = %target_path.display(),
            "moved uploaded file"
        );

        self.state = MoveState::Moved {
            target: target_path.to_path_buf(),
        };

        Ok(())
    }

    fn move_stream(&self, source: &Path, target: &Path) -> io::Result<()> {
        match self.context.runtime_mode() {
            RuntimeMode::HostedByFrontend => {
                if !self.context.is_genuine_upload(source) {
                    return Err(io::Error::new(
                        io::ErrorKind::PermissionDenied,
                        format!("{} is not an uploaded file", source.display()),
                    ));
                }
                relocate(source, target)
            }
            RuntimeMode::StandaloneProcess => relocate(source, target),
        }
    }
}

impl<S> UploadedFile<S> {
    /// Returns the size in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns the native upload error code.
    pub fn error(&self) -> i32 {
        self.error.to_native_code()
    }

    /// Returns the upload outcome.
    pub fn error_code(&self) -> UploadErrorCode {
        self.error
    }

    /// Returns the filename sent by the client.
    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    /// Returns the media type sent by the client.
    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    /// Returns `true` once the file has been moved.
    pub fn is_moved(&self) -> bool {
        matches!(self.state, MoveState::Moved { .. })
    }

    /// Returns where the file was moved to.
    pub fn target_path(&self) -> Option<&Path> {
        match &self.state {
            MoveState::Moved { target } => Some(target),
            MoveState::Pending(_) => None,
        }
    }

    /// Returns the runtime mode the move primitive was chosen with.
    pub fn runtime_mode(&self) -> RuntimeMode {
        self.context.runtime_mode()
    }
}

fn validate_stream<S: UploadStream + ?Sized>(
    stream: &S,
    context: &UploadContext,
) -> Result<(), StreamError> {
    let path = stream.uri().unwrap_or(Path::new(""));

    if !path.is_file() {
        return Err(StreamError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    if !stream.is_readable() {
        return Err(StreamError::NotReadable);
    }
    if !context.is_genuine_upload(path) {
        return Err(StreamError::NotAnUpload {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

fn check_target_dir(target: &Path) -> Result<(), TargetError> {
    let dir = match target.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(TargetError::TargetDirMissing {
                dir: target.to_path_buf(),
            });
        }
    };

    if !dir.is_dir() {
        return Err(TargetError::TargetDirMissing {
            dir: dir.to_path_buf(),
        });
    }

    // Effective access of this process, not the permission bits.
    if !dir.writable() {
        return Err(TargetError::TargetDirNotWritable {
            dir: dir.to_path_buf(),
        });
    }

    Ok(())
}

/// Renames `from` to `to`, copying across filesystems when a rename cannot.
fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    settle_rename(fs::rename(from, to), from, to, |path: &Path| fs::remove_file(path))
}

/// Completes a rename that failed with `CrossesDevices` by copying `from`
/// and removing it with `remove_source`. Any other outcome is returned as is.
///
/// If the source cannot be removed the copy is discarded, so exactly one of
/// `from` and `to` holds the content afterwards.
fn settle_rename<F>(
    renamed: io::Result<()>,
    from: &Path,
    to: &Path,
    remove_source: F,
) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    match renamed {
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(
                target: TRACING_TARGET_FILE,
                source = %from.display(),
                target = %to.display(),
                "rename crosses filesystems, copying instead"
            );
        }
        result => return result,
    }

    fs::copy(from, to)?;

    if let Err(err) = remove_source(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            tracing::warn!(
                target: TRACING_TARGET_FILE,
                target = %to.display(),
                error = %cleanup,
                "failed to discard copied upload"
            );
        }
        return Err(err);
    }

    Ok(())
}
