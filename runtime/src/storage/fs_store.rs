use std::path::PathBuf;

use async_trait::async_trait;

use super::io::write_bytes_atomic;
use super::{StorageError, TableStore};

/// Filesystem-backed object store rooted at the working directory. Keys are
/// slash-separated paths below the root, like their bucket counterparts.
#[derive(Debug, Clone)]
pub struct FsTableStore {
    root: PathBuf,
}

impl FsTableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl TableStore for FsTableStore {
    async fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        write_bytes_atomic(&self.object_path(key), bytes)
            .await
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })
    }
}
