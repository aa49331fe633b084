//! Upload configuration and the resolved upload context.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::mode::RuntimeMode;
use crate::verify::{UploadDirVerifier, UploadVerifier};

/// Upload handling configuration.
///
/// Resolved into an [`UploadContext`] once at startup with
/// [`UploadContext::from_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct UploadConfig {
    /// Directory the front-end writes upload tempfiles into.
    /// Files directly inside it are accepted as genuine uploads.
    #[cfg_attr(feature = "config", arg(long = "upload-dir", env = "UPLOAD_DIR"))]
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,

    /// Runtime mode override (`hosted-by-frontend` or `standalone-process`).
    /// Detected from the process environment when absent.
    #[cfg_attr(
        feature = "config",
        arg(long = "upload-runtime-mode", env = "UPLOAD_RUNTIME_MODE")
    )]
    #[serde(default)]
    pub runtime_mode: Option<RuntimeMode>,
}

impl UploadConfig {
    /// Creates a new configuration with the specified upload directory.
    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(upload_dir.into());
        self
    }

    /// Creates a new configuration with a fixed runtime mode.
    pub fn with_runtime_mode(mut self, runtime_mode: RuntimeMode) -> Self {
        self.runtime_mode = Some(runtime_mode);
        self
    }
}

/// The collaborators every uploaded file is validated and moved with.
///
/// Holds the runtime mode, resolved exactly once, and the verifiers that
/// decide whether a file is a genuine upload. A path passes if any verifier
/// accepts it. Cloning is cheap; verifiers are shared via `Arc`.
#[derive(Clone)]
pub struct UploadContext {
    runtime_mode: RuntimeMode,
    verifiers: Vec<Arc<dyn UploadVerifier>>,
}

impl fmt::Debug for UploadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadContext")
            .field("runtime_mode", &self.runtime_mode)
            .field("verifiers", &self.verifiers.len())
            .finish()
    }
}

impl UploadContext {
    /// Creates a context with no verifiers.
    ///
    /// Until a verifier is added every stream is rejected as not an upload.
    pub fn new(runtime_mode: RuntimeMode) -> Self {
        Self {
            runtime_mode,
            verifiers: Vec::new(),
        }
    }

    /// Creates a standalone-process context, the mode tests run in.
    pub fn standalone() -> Self {
        Self::new(RuntimeMode::StandaloneProcess)
    }

    /// Resolves a configuration, probing the runtime mode if not set.
    pub fn from_config(config: &UploadConfig) -> Self {
        let runtime_mode = config.runtime_mode.unwrap_or_else(RuntimeMode::detect);
        let context = Self::new(runtime_mode);

        match &config.upload_dir {
            Some(dir) => context.with_verifier(UploadDirVerifier::new(dir)),
            None => context,
        }
    }

    /// Adds a verifier.
    pub fn with_verifier(mut self, verifier: impl UploadVerifier + 'static) -> Self {
        self.verifiers.push(Arc::new(verifier));
        self
    }

    /// Returns the resolved runtime mode.
    pub fn runtime_mode(&self) -> RuntimeMode {
        self.runtime_mode
    }

    /// Returns `true` if any verifier accepts `path` as a genuine upload.
    pub fn is_genuine_upload(&self, path: &Path) -> bool {
        self.verifiers.iter().any(|v| v.is_genuine_upload(path))
    }
}
