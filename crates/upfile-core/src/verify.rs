//! Genuine upload verification.
//!
//! A stream only backs an uploaded file if its file was produced by the
//! upload mechanism. The check is an injected [`UploadVerifier`] rather than
//! a global, so tests can supply their own registry of emulated uploads.

use std::path::{Path, PathBuf};

use crate::TRACING_TARGET_VERIFY;

/// Decides whether a file was produced by a genuine upload.
pub trait UploadVerifier: Send + Sync {
    /// Returns `true` if `path` is a genuine upload tempfile.
    fn is_genuine_upload(&self, path: &Path) -> bool;
}

impl<F> UploadVerifier for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_genuine_upload(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Accepts regular files stored directly inside the upload temp directory.
///
/// Both the directory and the candidate are canonicalized, so symlinks and
/// `..` segments cannot smuggle an arbitrary file past the check.
#[derive(Debug, Clone)]
pub struct UploadDirVerifier {
    upload_dir: PathBuf,
}

impl UploadDirVerifier {
    /// Creates a verifier for the given upload temp directory.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Returns the upload temp directory.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

impl UploadVerifier for UploadDirVerifier {
    fn is_genuine_upload(&self, path: &Path) -> bool {
        let (Ok(dir), Ok(file)) = (self.upload_dir.canonicalize(), path.canonicalize()) else {
            tracing::trace!(
                target: TRACING_TARGET_VERIFY,
                path = %path.display(),
                upload_dir = %self.upload_dir.display(),
                "upload path could not be resolved"
            );
            return false;
        };

        file.is_file() && file.parent() == Some(dir.as_path())
    }
}
