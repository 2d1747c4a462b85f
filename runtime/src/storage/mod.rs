use async_trait::async_trait;
use thiserror::Error;

use crate::generator::GeneratedTables;

pub mod csv;
pub mod fs_store;
pub mod io;

pub use fs_store::FsTableStore;

pub const VERTICES_OBJECT: &str = "vertices.csv";
pub const EDGES_OBJECT: &str = "edges.csv";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write object {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for the generated tables: one whole object per call, the way
/// the bulk loader's object store takes them.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Encodes both tables and writes them under `prefix`. Returns the object
/// keys written, vertices first. Failures surface; a missing file must never
/// look like a successful run.
pub async fn write_tables(
    store: &dyn TableStore,
    prefix: &str,
    tables: &GeneratedTables,
) -> Result<(String, String), StorageError> {
    let vertices_key = object_key(prefix, VERTICES_OBJECT);
    let edges_key = object_key(prefix, EDGES_OBJECT);

    store
        .put_object(&vertices_key, &csv::encode_vertices(&tables.vertices))
        .await?;
    store
        .put_object(&edges_key, &csv::encode_edges(&tables.edges))
        .await?;

    Ok((vertices_key, edges_key))
}

fn object_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_join_cleanly() {
        assert_eq!(object_key("neptune", VERTICES_OBJECT), "neptune/vertices.csv");
        assert_eq!(object_key("/neptune/", EDGES_OBJECT), "neptune/edges.csv");
        assert_eq!(object_key("", VERTICES_OBJECT), "vertices.csv");
    }
}
