//! Node snapshot storage.
//!
//! Saves and restores [`NodeSnapshot`]s as JSON files, one per node.

use crate::paths::SpecklePaths;
use speckle_core::node::NodeSnapshot;
use speckle_core::{Result, SpeckleError};
use std::path::{Path, PathBuf};

/// Reads and writes node snapshots as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct NodeSnapshotStorage {
    dir: PathBuf,
}

impl NodeSnapshotStorage {
    /// Creates a storage rooted at the default nodes directory.
    pub fn new_default() -> Result<Self> {
        let dir = SpecklePaths::nodes_dir().map_err(|e| SpeckleError::config(e.to_string()))?;
        Ok(Self { dir })
    }

    /// Creates a storage rooted at a custom directory (for testing).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for `snapshot`'s node.
    pub fn path_for(&self, snapshot: &NodeSnapshot) -> PathBuf {
        self.dir.join(format!("{}.json", snapshot.node_id))
    }

    /// Writes a snapshot to its default location and returns the path.
    pub async fn save(&self, snapshot: &NodeSnapshot) -> Result<PathBuf> {
        let path = self.path_for(snapshot);
        Self::save_to(&path, snapshot).await?;
        Ok(path)
    }

    /// Writes a snapshot to an explicit path.
    ///
    /// The file is written to a sibling temp file first and renamed into place.
    pub async fn save_to(path: &Path, snapshot: &NodeSnapshot) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, permissions).await?;
        }

        tokio::fs::rename(&tmp_path, path).await?;
        tracing::debug!(path = %path.display(), node_id = %snapshot.node_id, "Saved node snapshot");
        Ok(())
    }

    /// Reads a snapshot from an explicit path.
    pub async fn load_from(path: &Path) -> Result<NodeSnapshot> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
