use scooters_runtime::generator::{FleetGenerator, FleetSettings};
use scooters_runtime::storage::{
    EDGES_OBJECT, FsTableStore, TableStore, VERTICES_OBJECT, write_tables,
};
use tempfile::TempDir;

fn temp_working_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

#[tokio::test]
async fn writes_both_tables_with_exact_headers() -> anyhow::Result<()> {
    let dir = temp_working_dir();
    let store = FsTableStore::new(dir.path());

    let tables = FleetGenerator::new(FleetSettings {
        scooters: 3,
        parts_per_scooter: 2,
        seed: Some(301),
    })
    .generate();

    let (vertices_key, edges_key) = write_tables(&store, "neptune", &tables).await?;
    assert_eq!(vertices_key, "neptune/vertices.csv");
    assert_eq!(edges_key, "neptune/edges.csv");

    let vertices_csv = tokio::fs::read_to_string(store.object_path(&vertices_key)).await?;
    let mut lines = vertices_csv.lines();
    assert_eq!(lines.next(), Some("~label,~id,parent_id,name"));
    assert_eq!(lines.count(), tables.vertices.len());

    let edges_csv = tokio::fs::read_to_string(store.object_path(&edges_key)).await?;
    let mut lines = edges_csv.lines();
    assert_eq!(lines.next(), Some("~label,~to,~from,~id"));
    assert_eq!(lines.count(), tables.edges.len());

    Ok(())
}

#[tokio::test]
async fn atomic_writes_leave_no_temp_files_behind() -> anyhow::Result<()> {
    let dir = temp_working_dir();
    let store = FsTableStore::new(dir.path());

    let tables = FleetGenerator::new(FleetSettings {
        scooters: 1,
        parts_per_scooter: 0,
        seed: Some(302),
    })
    .generate();

    write_tables(&store, "out", &tables).await?;

    let mut entries = tokio::fs::read_dir(dir.path().join("out")).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    assert_eq!(names, vec![EDGES_OBJECT.to_string(), VERTICES_OBJECT.to_string()]);

    Ok(())
}

#[tokio::test]
async fn put_object_creates_nested_prefixes_and_overwrites() -> anyhow::Result<()> {
    let dir = temp_working_dir();
    let store = FsTableStore::new(dir.path());

    store.put_object("a/b/data.csv", b"first\n").await?;
    store.put_object("a/b/data.csv", b"second\n").await?;

    let content = tokio::fs::read_to_string(store.object_path("a/b/data.csv")).await?;
    assert_eq!(content, "second\n");

    Ok(())
}

#[tokio::test]
async fn empty_batch_still_writes_headers() -> anyhow::Result<()> {
    let dir = temp_working_dir();
    let store = FsTableStore::new(dir.path());

    let tables = FleetGenerator::new(FleetSettings {
        scooters: 0,
        parts_per_scooter: 0,
        seed: Some(303),
    })
    .generate();

    let (vertices_key, edges_key) = write_tables(&store, "", &tables).await?;
    assert_eq!(vertices_key, "vertices.csv");

    let vertices_csv = tokio::fs::read_to_string(store.object_path(&vertices_key)).await?;
    assert_eq!(vertices_csv, "~label,~id,parent_id,name\n");
    let edges_csv = tokio::fs::read_to_string(store.object_path(&edges_key)).await?;
    assert_eq!(edges_csv, "~label,~to,~from,~id\n");

    Ok(())
}
