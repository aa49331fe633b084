#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Upfile Core
//!
//! This crate provides the uploaded-file value object handed to request
//! handlers once a multipart body has been parsed: the client-supplied
//! metadata, the upload outcome code, a readable stream over the temporary
//! file, and a one-shot move of that file to its final destination.

/// Tracing target for uploaded file validation and moves.
pub const TRACING_TARGET_FILE: &str = "upfile_core::file";

/// Tracing target for the uploaded file factory.
pub const TRACING_TARGET_FACTORY: &str = "upfile_core::factory";

/// Tracing target for upload verification.
pub const TRACING_TARGET_VERIFY: &str = "upfile_core::verify";

mod code;
mod config;
mod contract;
mod error;
mod factory;
mod mode;
mod verify;

pub mod file;
pub mod prelude;
pub mod stream;

pub use code::UploadErrorCode;
pub use config::{UploadConfig, UploadContext};
pub use contract::{UploadedFileContract, UploadedFileFactoryContract};
pub use error::{ErrorKind, Result, StreamError, TargetError, UnknownErrorCode, UploadError};
pub use factory::UploadedFileFactory;
pub use file::{UploadMetadata, UploadedFile};
pub use mode::RuntimeMode;
pub use stream::{AccessMode, FileStream, UploadStream};
pub use verify::{UploadDirVerifier, UploadVerifier};
