#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for fixture generation.
pub const TRACING_TARGET_FIXTURE: &str = "upfile_test::fixture";

mod fixture;
mod registry;

#[cfg(test)]
mod scenarios;

pub use fixture::{GeneratedUpload, UploadFixture, UploadKind};
pub use registry::EmulatedUploads;
