//! Uploaded file module
//!
//! This module provides the value object handed to request handlers for
//! every file field of a parsed request body.
//!
//! # Core Types
//!
//! - [`UploadedFile`]: Validated upload with a readable stream and a one-shot move
//! - [`UploadMetadata`]: Client-supplied size, outcome code, filename and media type

mod metadata;
mod uploaded_file;

// Re-export main types
pub use metadata::UploadMetadata;
pub use uploaded_file::UploadedFile;
