//! Uploaded file factory.

use crate::TRACING_TARGET_FACTORY;
use crate::code::UploadErrorCode;
use crate::config::{UploadConfig, UploadContext};
use crate::error::Result;
use crate::file::{UploadMetadata, UploadedFile};
use crate::stream::UploadStream;

/// Builds [`UploadedFile`]s from the primitive values a request parser
/// produces, sharing one [`UploadContext`] between them.
#[derive(Debug, Clone)]
pub struct UploadedFileFactory {
    context: UploadContext,
}

impl UploadedFileFactory {
    /// Creates a factory over the given context.
    pub fn new(context: UploadContext) -> Self {
        Self { context }
    }

    /// Creates a factory from configuration.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(UploadContext::from_config(config))
    }

    /// Returns the shared upload context.
    pub fn context(&self) -> &UploadContext {
        &self.context
    }

    /// Creates an uploaded file.
    ///
    /// An `error` outside the native numbering is treated as a successful
    /// upload.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidUpload`](crate::UploadError::InvalidUpload)
    /// if the stream does not back a genuine, readable upload.
    pub fn create_uploaded_file<S: UploadStream>(
        &self,
        stream: S,
        size: Option<i64>,
        error: i32,
        client_filename: Option<String>,
        client_media_type: Option<String>,
    ) -> Result<UploadedFile<S>> {
        let error = UploadErrorCode::from_native_code(error).unwrap_or_else(|err| {
            tracing::debug!(
                target: TRACING_TARGET_FACTORY,
                error = %err,
                "treating unknown upload error code as success"
            );
            UploadErrorCode::Ok
        });

        let metadata = UploadMetadata {
            size,
            error,
            client_filename,
            client_media_type,
        };

        UploadedFile::new(stream, metadata, &self.context)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::error::{StreamError, UploadError};
    use crate::mode::RuntimeMode;
    use crate::stream::{AccessMode, FileStream};

    fn factory_for(dir: &Path) -> UploadedFileFactory {
        let config = UploadConfig::default()
            .with_upload_dir(dir)
            .with_runtime_mode(RuntimeMode::StandaloneProcess);
        UploadedFileFactory::from_config(&config)
    }

    fn upload_stream(dir: &Path) -> FileStream {
        let path = dir.join("upload");
        fs::write(&path, b"factory content").unwrap();
        FileStream::open(path, AccessMode::Read).unwrap()
    }

    #[test]
    fn test_create_with_defaults() {
        let temp = TempDir::new().unwrap();
        let factory = factory_for(temp.path());

        let upload = factory
            .create_uploaded_file(upload_stream(temp.path()), None, 0, None, None)
            .unwrap();

        assert_eq!(upload.size(), None);
        assert_eq!(upload.error(), 0);
        assert_eq!(upload.client_filename(), None);
        assert_eq!(upload.client_media_type(), None);
        assert_eq!(upload.runtime_mode(), RuntimeMode::StandaloneProcess);
    }

    #[test]
    fn test_create_passes_values_through() {
        let temp = TempDir::new().unwrap();
        let factory = factory_for(temp.path());

        let upload = factory
            .create_uploaded_file(
                upload_stream(temp.path()),
                Some(15),
                UploadErrorCode::SizeExceedsFormLimit.to_native_code(),
                Some("notes.txt".to_string()),
                Some("text/plain".to_string()),
            )
            .unwrap();

        assert_eq!(upload.size(), Some(15));
        assert_eq!(upload.error_code(), UploadErrorCode::SizeExceedsFormLimit);
        assert_eq!(upload.client_filename(), Some("notes.txt"));
        assert_eq!(upload.client_media_type(), Some("text/plain"));
    }

    #[test]
    fn test_unknown_code_becomes_ok() {
        let temp = TempDir::new().unwrap();
        let factory = factory_for(temp.path());

        for code in [5, 9, -1, 1000] {
            let upload = factory
                .create_uploaded_file(upload_stream(temp.path()), None, code, None, None)
                .unwrap();
            assert_eq!(upload.error_code(), UploadErrorCode::Ok, "code {code}");
        }
    }

    #[test]
    fn test_invalid_stream_propagates() {
        let uploads = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let factory = factory_for(uploads.path());

        let err = factory
            .create_uploaded_file(upload_stream(elsewhere.path()), None, 0, None, None)
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::InvalidUpload(StreamError::NotAnUpload { .. })
        ));
    }
}
