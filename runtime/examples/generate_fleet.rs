//! Generate a small fleet offline and write the loader CSVs locally.
//!
//! Usage:
//!   cargo run --example generate_fleet
//!   head -5 data/neptune/vertices.csv

use rand::SeedableRng;
use rand::rngs::StdRng;

use scooters_runtime::generator::{
    FleetGenerator, FleetSettings, build_scooter_subtree, render_tree,
};
use scooters_runtime::storage::{FsTableStore, write_tables};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // One sample subtree, rendered the way it hangs together.
    let mut rng = StdRng::seed_from_u64(7);
    let tree = build_scooter_subtree(&mut rng, 3);
    println!("sample scooter subtree ({} assets):\n", tree.node_count());
    print!("{}", render_tree(&tree));

    // A small batch, written as the bulk loader expects it.
    let generator = FleetGenerator::new(FleetSettings {
        scooters: 100,
        parts_per_scooter: 5,
        seed: None,
    });
    let tables = generator.generate();

    let store = FsTableStore::new("./data");
    let (vertices_key, edges_key) = write_tables(&store, "neptune", &tables).await?;

    println!(
        "\nwrote {} vertex rows to data/{} and {} edge rows to data/{}",
        tables.vertices.len(),
        vertices_key,
        tables.edges.len(),
        edges_key
    );
    Ok(())
}
