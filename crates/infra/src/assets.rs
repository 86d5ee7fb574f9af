//! Device-local photo references resolved from the filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kindred_core::AssetReader;
use kindred_domain::{KindredError, Result};
use tracing::debug;

const FILE_SCHEME: &str = "file://";

/// Reads `file://` or plain path references. Relative paths resolve against
/// `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileAssetReader {
    root: Option<PathBuf>,
}

impl FileAssetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    /// Filesystem path for a local reference.
    pub fn resolve(&self, local_ref: &str) -> PathBuf {
        let raw = local_ref.strip_prefix(FILE_SCHEME).unwrap_or(local_ref);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl AssetReader for FileAssetReader {
    async fn read(&self, local_ref: &str) -> Result<Vec<u8>> {
        let path = self.resolve(local_ref);
        debug!(path = %path.display(), "reading local photo");
        tokio::fs::read(&path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => KindredError::NotFound(format!("photo {}", path.display())),
            _ => KindredError::Storage(format!("failed to read {}: {err}", path.display())),
        })
    }
}
