//! File-backed upload stream
//!
//! This module provides the [`FileStream`] struct, the stream handed to an
//! uploaded file when its content lives in a temporary file on disk.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::{AccessMode, UploadStream};

/// A stream over a file on the local filesystem
///
/// Reading, writing and seeking are delegated to the underlying file. All of
/// them are available through a shared reference, so the stream returned by
/// [`UploadedFile::stream`](crate::UploadedFile::stream) can be read directly.
#[derive(Debug)]
pub struct FileStream {
    /// The underlying file handle
    file: File,
    /// Path to the file
    path: PathBuf,
    /// Mode the file was opened with
    mode: AccessMode,
}

impl FileStream {
    /// Open a file with the given access mode
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened with the mode's options.
    pub fn open(path: impl AsRef<Path>, mode: AccessMode) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = mode.open_options().open(&path)?;

        Ok(Self { file, path, mode })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the access mode
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Read the remaining content into a byte vector
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is not readable or the read fails.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        (&self.file).read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Rewind to the start of the file
    ///
    /// # Errors
    ///
    /// Returns an error if the seek operation fails.
    pub fn rewind(&self) -> io::Result<()> {
        (&self.file).seek(SeekFrom::Start(0)).map(|_| ())
    }
}

impl UploadStream for FileStream {
    fn is_readable(&self) -> bool {
        self.mode.is_readable()
    }

    fn is_writable(&self) -> bool {
        self.mode.is_writable()
    }

    fn uri(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

impl Read for &FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.file).read(buf)
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for &FileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&self.file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&self.file).flush()
    }
}

impl Write for FileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for &FileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (&self.file).seek(pos)
    }
}

impl Seek for FileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
