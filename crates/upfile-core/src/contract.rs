//! Standard uploaded file interface.
//!
//! Request handlers and middleware written against these traits accept any
//! uploaded file implementation, not only [`UploadedFile`].

use std::path::Path;

use crate::error::Result;
use crate::factory::UploadedFileFactory;
use crate::file::UploadedFile;
use crate::stream::UploadStream;

/// The uploaded file surface consumed by request handlers.
pub trait UploadedFileContract {
    /// Stream type exposed by [`stream`](Self::stream).
    type Stream: UploadStream;

    /// Returns the stream over the uploaded content.
    fn stream(&self) -> Result<&Self::Stream>;

    /// Moves the uploaded file to `target_path`, once.
    fn move_to(&mut self, target_path: &Path) -> Result<()>;

    /// Returns the size in bytes, if known.
    fn size(&self) -> Option<u64>;

    /// Returns the native upload error code.
    fn error(&self) -> i32;

    /// Returns the filename sent by the client.
    fn client_filename(&self) -> Option<&str>;

    /// Returns the media type sent by the client.
    fn client_media_type(&self) -> Option<&str>;
}

/// Creates uploaded files from primitive request values.
pub trait UploadedFileFactoryContract<S: UploadStream> {
    /// Uploaded file type produced by this factory.
    type File: UploadedFileContract<Stream = S>;

    /// Creates an uploaded file.
    fn create_uploaded_file(
        &self,
        stream: S,
        size: Option<i64>,
        error: i32,
        client_filename: Option<String>,
        client_media_type: Option<String>,
    ) -> Result<Self::File>;
}

impl<S: UploadStream> UploadedFileContract for UploadedFile<S> {
    type Stream = S;

    fn stream(&self) -> Result<&S> {
        UploadedFile::stream(self)
    }

    fn move_to(&mut self, target_path: &Path) -> Result<()> {
        UploadedFile::move_to(self, target_path)
    }

    fn size(&self) -> Option<u64> {
        UploadedFile::size(self)
    }

    fn error(&self) -> i32 {
        UploadedFile::error(self)
    }

    fn client_filename(&self) -> Option<&str> {
        UploadedFile::client_filename(self)
    }

    fn client_media_type(&self) -> Option<&str> {
        UploadedFile::client_media_type(self)
    }
}

impl<S: UploadStream> UploadedFileFactoryContract<S> for UploadedFileFactory {
    type File = UploadedFile<S>;

    fn create_uploaded_file(
        &self,
        stream: S,
        size: Option<i64>,
        error: i32,
        client_filename: Option<String>,
        client_media_type: Option<String>,
    ) -> Result<UploadedFile<S>> {
        UploadedFileFactory::create_uploaded_file(
            self,
            stream,
            size,
            error,
            client_filename,
            client_media_type,
        )
    }
}
