use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }
    Ok(())
}

/// Atomically write bytes to disk using a temp file + rename.
///
/// The write is fsync'd to ensure durability.
pub async fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    ensure_parent_dir(path).await?;

    let tmp_path = temp_path(path);

    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;

    fs::rename(&tmp_path, path).await?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let file_name = path
        .file_name()
        .map(|name| format!("{}.tmp", name.to_string_lossy()))
        .unwrap_or_else(|| "object.tmp".to_string());
    tmp.set_file_name(file_name);
    tmp
}
