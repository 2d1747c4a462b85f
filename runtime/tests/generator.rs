use std::collections::HashSet;

use scooters_runtime::generator::{
    FleetGenerator, FleetSettings, GeneratedTables, ROOT_PARENT, label_of,
};

fn generate(scooters: u32, parts_per_scooter: u32, seed: u64) -> GeneratedTables {
    FleetGenerator::new(FleetSettings {
        scooters,
        parts_per_scooter,
        seed: Some(seed),
    })
    .generate()
}

#[test]
fn single_scooter_without_parts_has_the_core_structure() {
    let tables = generate(1, 0, 101);

    let roots: Vec<_> = tables
        .vertices
        .iter()
        .filter(|row| row.parent_id == ROOT_PARENT)
        .collect();
    assert_eq!(roots.len(), 1);
    let root = roots[0];
    assert_eq!(root.label, "scooter");
    let suffix = root.id.strip_prefix("scooter-").expect("scooter id shape");
    assert_eq!(suffix.len(), 6);

    let driver = tables
        .vertices
        .iter()
        .find(|row| row.label == "driver")
        .expect("driver present");
    assert_eq!(driver.parent_id, root.id);

    let payments: Vec<_> = tables
        .vertices
        .iter()
        .filter(|row| row.label == "payment_method")
        .collect();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].parent_id, driver.id);

    let owners: Vec<_> = tables
        .vertices
        .iter()
        .filter(|row| row.label == "fleet_owner")
        .collect();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].parent_id, root.id);

    assert_eq!(tables.edges.len(), tables.vertices.len() - 1);
    assert!(tables.edges.iter().all(|edge| edge.from != edge.to));
}

#[test]
fn vertex_edge_count_invariant_holds_across_sizes() {
    for (scooters, parts) in [(0u32, 0u32), (1, 0), (1, 7), (5, 3), (40, 2)] {
        let tables = generate(scooters, parts, 103);
        assert_eq!(
            tables.edges.len(),
            tables.vertices.len() - scooters as usize,
            "scooters={scooters} parts={parts}"
        );
    }
}

#[test]
fn edges_reference_vertices_under_unique_fresh_ids() {
    let tables = generate(30, 4, 107);

    let vertex_ids: HashSet<&str> = tables.vertices.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(vertex_ids.len(), tables.vertices.len(), "vertex ids collide");

    let mut edge_ids = HashSet::new();
    for edge in &tables.edges {
        assert_eq!(edge.label, "has");
        assert!(vertex_ids.contains(edge.from.as_str()), "dangling from {}", edge.from);
        assert!(vertex_ids.contains(edge.to.as_str()), "dangling to {}", edge.to);
        assert!(edge_ids.insert(edge.id.as_str()), "duplicate edge id {}", edge.id);
    }
}

#[test]
fn vertex_labels_match_the_id_stems() {
    let tables = generate(20, 3, 109);
    for row in &tables.vertices {
        assert_eq!(row.label, label_of(&row.id), "row {row:?}");
        assert_eq!(row.name, row.id);
        if row.id.starts_with("part_") {
            assert_eq!(row.label, "part");
        }
    }
}

#[test]
fn part_counts_are_exact_per_scooter() {
    let scooters = 50u32;
    let parts = 6u32;
    let tables = generate(scooters, parts, 113);

    let part_rows = tables.vertices.iter().filter(|row| row.label == "part").count();
    assert_eq!(part_rows, (scooters * parts) as usize);

    let manufacturers = tables
        .vertices
        .iter()
        .filter(|row| row.label == "manufacturer")
        .count();
    assert_eq!(manufacturers, (scooters * parts) as usize);
}

// Regression/volume baseline: the branching probabilities put the expected
// subtree size at 1 + 2/11 + 3p + 1.75 + 2 + 0.44 + 1 nodes per scooter,
// about 36.37 for ten parts.
#[test]
fn large_batch_volume_tracks_the_branching_expectation() {
    let scooters = 10_000u32;
    let tables = generate(scooters, 10, 127);

    let expected = f64::from(scooters) * 36.3718;
    let observed = tables.vertices.len() as f64;
    let deviation = (observed - expected).abs() / expected;
    assert!(
        deviation < 0.02,
        "vertex volume {observed} deviates {deviation:.4} from expectation {expected}"
    );

    assert_eq!(tables.edges.len(), tables.vertices.len() - scooters as usize);
}
