//! Stream collaborator contract for uploaded files
//!
//! An uploaded file does not read or write data itself; it only needs to know
//! where the stream's bytes live on disk and whether the stream may be read.
//!
//! # Core Types
//!
//! - [`UploadStream`]: The contract a stream must satisfy to back an upload
//! - [`FileStream`]: A stream over a file on the local filesystem
//! - [`AccessMode`]: The mode a [`FileStream`] was opened with
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//!
//! use upfile_core::stream::{AccessMode, FileStream, UploadStream};
//!
//! fn example() -> std::io::Result<()> {
//!     let stream = FileStream::open("/tmp/upload-3b1f", AccessMode::Read)?;
//!     assert!(stream.is_readable());
//!
//!     let mut contents = String::new();
//!     (&stream).read_to_string(&mut contents)?;
//!     Ok(())
//! }
//! ```

mod access_mode;
mod file_stream;

use std::path::Path;

pub use access_mode::AccessMode;
pub use file_stream::FileStream;

/// A readable data stream positioned at the content of an uploaded file.
///
/// Only the two capabilities uploaded file validation relies on are required.
pub trait UploadStream {
    /// Returns `true` if the stream was opened for reading.
    fn is_readable(&self) -> bool;

    /// Returns `true` if the stream was opened for writing.
    fn is_writable(&self) -> bool {
        false
    }

    /// Returns the path of the file backing this stream, if it has one.
    fn uri(&self) -> Option<&Path>;
}
