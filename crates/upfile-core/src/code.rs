//! Upload outcome codes.
//!
//! This module provides the [`UploadErrorCode`] enum, a closed mapping of
//! upload outcomes to the numeric codes reported by the hosting environment
//! and to fixed human-readable messages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::UnknownErrorCode;

/// Classification of why a file upload succeeded or failed.
///
/// The discriminants match the native upload error numbering; `5` is not
/// assigned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum UploadErrorCode {
    /// The file uploaded with success.
    #[default]
    Ok = 0,
    /// The file exceeds the server-wide upload size limit.
    SizeExceedsServerLimit = 1,
    /// The file exceeds the size limit declared by the form.
    SizeExceedsFormLimit = 2,
    /// The file was only partially received.
    PartialUpload = 3,
    /// The field carried no file.
    NoFile = 4,
    /// No temporary directory was available.
    NoTempDirectory = 6,
    /// The temporary file could not be written.
    WriteFailure = 7,
    /// An extension blocked the upload.
    ExtensionBlocked = 8,
}

impl UploadErrorCode {
    /// Returns the native numeric code.
    #[must_use]
    pub fn to_native_code(self) -> i32 {
        self as i32
    }

    /// Returns the fixed description of this outcome.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Ok => "there is no error, the file uploaded with success",
            Self::SizeExceedsServerLimit => {
                "the uploaded file exceeds the maximum upload size configured on the server"
            }
            Self::SizeExceedsFormLimit => {
                "the uploaded file exceeds the MAX_FILE_SIZE directive that was specified in the HTML form"
            }
            Self::PartialUpload => "the uploaded file was only partially uploaded",
            Self::NoFile => "no file was uploaded",
            Self::NoTempDirectory => "missing a temporary folder",
            Self::WriteFailure => "failed to write file to disk",
            Self::ExtensionBlocked => "a server extension stopped the file upload",
        }
    }

    /// Resolves a native numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownErrorCode`] if `value` is not part of the numbering.
    pub fn from_native_code(value: i32) -> Result<Self, UnknownErrorCode> {
        Self::iter()
            .find(|code| code.to_native_code() == value)
            .ok_or(UnknownErrorCode(value))
    }

    /// Returns `true` if this code reports a successful upload.
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl TryFrom<i32> for UploadErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_native_code(value)
    }
}

impl From<UploadErrorCode> for i32 {
    fn from(code: UploadErrorCode) -> Self {
        code.to_native_code()
    }
}
