//! Registry of emulated uploads.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use upfile_core::{RuntimeMode, UploadContext, UploadVerifier};

/// Paths a test wants treated as genuine uploads.
///
/// Cloning is cheap: clones share the same set via `Arc`, so a registry can
/// be handed to an [`UploadContext`] and still be updated by the test.
/// Paths are compared exactly, without canonicalization.
#[derive(Debug, Clone, Default)]
pub struct EmulatedUploads {
    paths: Arc<RwLock<HashSet<PathBuf>>>,
}

impl EmulatedUploads {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as a genuine upload.
    pub fn register(&self, path: impl Into<PathBuf>) {
        self.paths
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    /// Removes `path`, returning whether it was registered.
    pub fn unregister(&self, path: &Path) -> bool {
        self.paths
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Returns `true` if `path` is registered.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    /// Returns the number of registered paths.
    pub fn len(&self) -> usize {
        self.paths.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a standalone-process context that accepts registered paths.
    pub fn context(&self) -> UploadContext {
        self.context_with_mode(RuntimeMode::StandaloneProcess)
    }

    /// Returns a context with the given runtime mode that accepts registered paths.
    pub fn context_with_mode(&self, runtime_mode: RuntimeMode) -> UploadContext {
        UploadContext::new(runtime_mode).with_verifier(self.clone())
    }
}

impl UploadVerifier for EmulatedUploads {
    fn is_genuine_upload(&self, path: &Path) -> bool {
        self.contains(path)
    }
}
