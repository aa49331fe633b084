//! Client-supplied upload metadata.

use serde::{Deserialize, Serialize};

use crate::code::UploadErrorCode;

/// Metadata reported alongside an uploaded file
///
/// Values are kept as received. [`UploadedFile::new`](crate::UploadedFile::new)
/// normalizes them: a non-positive size becomes unknown and empty names become
/// absent.
///
/// # Examples
///
/// ```rust
/// use upfile_core::{UploadErrorCode, UploadMetadata};
///
/// let metadata = UploadMetadata::new()
///     .with_size(1024)
///     .with_client_filename("avatar.png")
///     .with_client_media_type("image/png");
///
/// assert_eq!(metadata.error, UploadErrorCode::Ok);
/// assert_eq!(metadata.size, Some(1024));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct UploadMetadata {
    /// Size in bytes as reported by the client or front-end.
    #[serde(default)]
    pub size: Option<i64>,
    /// Upload outcome.
    #[serde(default)]
    pub error: UploadErrorCode,
    /// Filename sent by the client.
    #[serde(default)]
    pub client_filename: Option<String>,
    /// Media type sent by the client.
    #[serde(default)]
    pub client_media_type: Option<String>,
}

impl UploadMetadata {
    /// Creates empty metadata for a successful upload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported size
    #[must_use]
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the upload outcome
    #[must_use]
    pub fn with_error(mut self, error: UploadErrorCode) -> Self {
        self.error = error;
        self
    }

    /// Set the client filename
    #[must_use]
    pub fn with_client_filename<S: Into<String>>(mut self, client_filename: S) -> Self {
        self.client_filename = Some(client_filename.into());
        self
    }

    /// Set the client media type
    #[must_use]
    pub fn with_client_media_type<S: Into<String>>(mut self, client_media_type: S) -> Self {
        self.client_media_type = Some(client_media_type.into());
        self
    }
}
