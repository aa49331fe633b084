//! Convenient re-exports for common use.

pub use crate::code::UploadErrorCode;
pub use crate::config::{UploadConfig, UploadContext};
pub use crate::contract::{UploadedFileContract, UploadedFileFactoryContract};
pub use crate::error::{ErrorKind, Result, StreamError, TargetError, UploadError};
pub use crate::factory::UploadedFileFactory;
pub use crate::file::{UploadMetadata, UploadedFile};
pub use crate::mode::RuntimeMode;
pub use crate::stream::{AccessMode, FileStream, UploadStream};
pub use crate::verify::{UploadDirVerifier, UploadVerifier};
