//! Runtime environment of the process handling uploads.

use std::env;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Environment variable set by CGI and FastCGI front-ends for every request.
const GATEWAY_INTERFACE: &str = "GATEWAY_INTERFACE";

/// Whether the process serves requests behind a web front-end.
///
/// Decides which move primitive an uploaded file uses: behind a front-end the
/// source is re-verified as a genuine upload before it is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeMode {
    /// Requests are handed over by a web front-end.
    HostedByFrontend,
    /// A command-line, test or debug process.
    StandaloneProcess,
}

impl RuntimeMode {
    /// Probes the process environment.
    ///
    /// Callers resolve this once and pass the result along; see
    /// [`UploadContext`](crate::UploadContext).
    pub fn detect() -> Self {
        Self::from_gateway_interface(env::var_os(GATEWAY_INTERFACE).as_deref())
    }

    fn from_gateway_interface(value: Option<&std::ffi::OsStr>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Self::HostedByFrontend,
            _ => Self::StandaloneProcess,
        }
    }

    /// Returns `true` if uploads are moved with the upload-specific primitive.
    #[must_use]
    pub fn is_hosted(self) -> bool {
        matches!(self, Self::HostedByFrontend)
    }
}
