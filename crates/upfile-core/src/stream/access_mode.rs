//! File access modes for [`FileStream`](super::FileStream).

use std::fs::OpenOptions;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The mode a file stream is opened with, named after the `fopen` mode strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
pub enum AccessMode {
    /// Read only.
    #[default]
    #[strum(serialize = "r")]
    #[serde(rename = "r")]
    Read,
    /// Read and write, no truncation.
    #[strum(serialize = "r+")]
    #[serde(rename = "r+")]
    ReadWrite,
    /// Write only, truncating, creating the file if missing.
    #[strum(serialize = "w")]
    #[serde(rename = "w")]
    Write,
    /// Read and write, truncating, creating the file if missing.
    #[strum(serialize = "w+")]
    #[serde(rename = "w+")]
    WriteRead,
    /// Append only, creating the file if missing.
    #[strum(serialize = "a")]
    #[serde(rename = "a")]
    Append,
    /// Read and append, creating the file if missing.
    #[strum(serialize = "a+")]
    #[serde(rename = "a+")]
    AppendRead,
    /// Write only, creating the file if missing, without truncation.
    #[strum(serialize = "c")]
    #[serde(rename = "c")]
    Create,
    /// Read and write, creating the file if missing, without truncation.
    #[strum(serialize = "c+")]
    #[serde(rename = "c+")]
    CreateRead,
}

impl AccessMode {
    /// Returns `true` if a stream opened with this mode may be read.
    #[must_use]
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::Write | Self::Append | Self::Create)
    }

    /// Returns `true` if a stream opened with this mode may be written.
    #[must_use]
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::Read)
    }

    /// Returns `true` if opening with this mode discards existing content.
    #[must_use]
    pub fn truncates(self) -> bool {
        matches!(self, Self::Write | Self::WriteRead)
    }

    /// Returns the open options matching this mode.
    pub fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => options.read(true),
            Self::ReadWrite => options.read(true).write(true),
            Self::Write => options.write(true).create(true).truncate(true),
            Self::WriteRead => options.read(true).write(true).create(true).truncate(true),
            Self::Append => options.append(true).create(true),
            Self::AppendRead => options.read(true).append(true).create(true),
            Self::Create => options.write(true).create(true).truncate(false),
            Self::CreateRead => options.read(true).write(true).create(true).truncate(false),
        };
        options
    }
}
