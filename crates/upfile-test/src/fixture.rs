//! Upload fixture generation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::distr::{Alphanumeric, SampleString};
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use tempfile::TempDir;
use upfile_core::{
    AccessMode, FileStream, RuntimeMode, UploadContext, UploadErrorCode, UploadMetadata,
    UploadedFileFactory,
};
use uuid::Uuid;

use crate::TRACING_TARGET_FIXTURE;
use crate::registry::EmulatedUploads;

/// File types a fixture generates uploads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum UploadKind {
    /// Plain text document.
    Text,
    /// JPEG image.
    Jpeg,
    /// PDF document.
    Pdf,
}

impl UploadKind {
    /// Returns the file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    /// Returns the media type a client would report.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Jpeg => "image/jpeg",
            Self::Pdf => "application/pdf",
        }
    }

    fn random() -> Self {
        Self::iter()
            .nth(rand::random_range(0..Self::COUNT))
            .unwrap_or(Self::Text)
    }
}

/// What a front-end reports for one generated upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUpload {
    /// Filename the client sent.
    pub client_filename: String,
    /// Media type the client sent.
    pub client_media_type: String,
    /// Location of the upload tempfile.
    pub tmp_path: PathBuf,
    /// Upload outcome.
    pub error: UploadErrorCode,
    /// Content length in bytes.
    pub size: u64,
}

impl GeneratedUpload {
    /// Returns the metadata a front-end would hand to the factory.
    pub fn metadata(&self) -> UploadMetadata {
        UploadMetadata::new()
            .with_size(i64::try_from(self.size).unwrap_or(i64::MAX))
            .with_error(self.error)
            .with_client_filename(self.client_filename.clone())
            .with_client_media_type(self.client_media_type.clone())
    }
}

/// Generates upload tempfiles registered with an [`EmulatedUploads`].
///
/// Files live in a private temporary directory with separate `uploads`,
/// `files` and `targets` subdirectories. Dropping the fixture unregisters
/// every generated upload and deletes the directory.
#[derive(Debug)]
pub struct UploadFixture {
    dir: TempDir,
    uploads: EmulatedUploads,
    generated: Vec<PathBuf>,
}

impl UploadFixture {
    /// Creates a fixture with its own registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directories cannot be created.
    pub fn new() -> io::Result<Self> {
        Self::with_registry(EmulatedUploads::new())
    }

    /// Creates a fixture that registers into an existing registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directories cannot be created.
    pub fn with_registry(uploads: EmulatedUploads) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("upfile-").tempdir()?;
        for sub in ["uploads", "files", "targets"] {
            fs::create_dir(dir.path().join(sub))?;
        }

        Ok(Self {
            dir,
            uploads,
            generated: Vec::new(),
        })
    }

    /// Returns the registry generated uploads are registered with.
    pub fn uploads(&self) -> &EmulatedUploads {
        &self.uploads
    }

    /// Returns a standalone-process context accepting generated uploads.
    pub fn context(&self) -> UploadContext {
        self.uploads.context()
    }

    /// Returns a context with the given mode accepting generated uploads.
    pub fn context_with_mode(&self, runtime_mode: RuntimeMode) -> UploadContext {
        self.uploads.context_with_mode(runtime_mode)
    }

    /// Returns a factory over [`context`](Self::context).
    pub fn factory(&self) -> UploadedFileFactory {
        UploadedFileFactory::new(self.context())
    }

    /// Generates an upload of a random kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the tempfile cannot be written.
    pub fn generate(&mut self) -> io::Result<GeneratedUpload> {
        self.generate_kind(UploadKind::random())
    }

    /// Generates an upload of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the tempfile cannot be written.
    pub fn generate_kind(&mut self, kind: UploadKind) -> io::Result<GeneratedUpload> {
        let client_filename = format!("{}.{}", Uuid::new_v4().simple(), kind.extension());
        let tmp_path = self.dir.path().join("uploads").join(&client_filename);
        let content = random_text();
        fs::write(&tmp_path, &content)?;

        self.uploads.register(&tmp_path);
        self.generated.push(tmp_path.clone());

        tracing::trace!(
            target: TRACING_TARGET_FIXTURE,
            path = %tmp_path.display(),
            size = content.len(),
            "generated emulated upload"
        );

        Ok(GeneratedUpload {
            client_filename,
            client_media_type: kind.media_type().to_owned(),
            tmp_path,
            error: UploadErrorCode::Ok,
            size: content.len() as u64,
        })
    }

    /// Writes a file that is not registered as an upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn plain_file(&self) -> io::Result<PathBuf> {
        let path = self.dir.path().join("files").join(Uuid::new_v4().simple().to_string());
        fs::write(&path, random_text())?;
        Ok(path)
    }

    /// Returns a fresh path in an existing, writable directory.
    pub fn target_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("targets")
            .join(Uuid::new_v4().simple().to_string())
    }

    /// Returns a path whose parent directory does not exist.
    pub fn missing_dir_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("missing")
            .join(Uuid::new_v4().simple().to_string())
            .join("file")
    }

    /// Returns the fixture's root directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a stream over a generated upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened with `mode`.
    pub fn open(&self, upload: &GeneratedUpload, mode: AccessMode) -> io::Result<FileStream> {
        FileStream::open(&upload.tmp_path, mode)
    }
}

impl Drop for UploadFixture {
    fn drop(&mut self) {
        for path in self.generated.drain(..) {
            self.uploads.unregister(&path);
        }
    }
}

fn random_text() -> String {
    let lines: usize = rand::random_range(1..=16);
    (0..lines)
        .map(|_| Alphanumeric.sample_string(&mut rand::rng(), 32))
        .collect::<Vec<_>>()
        .join("\n")
}
