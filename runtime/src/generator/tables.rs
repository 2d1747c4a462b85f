use uuid::Uuid;

use super::tree::ScooterTree;

/// Sentinel parent id for graph roots; edge derivation filters on it.
pub const ROOT_PARENT: &str = "None";

/// Single relation label for the bulk loader. Finer edge typing (has_part,
/// has_claim, ...) would hang off the child label if ever needed.
pub const EDGE_LABEL: &str = "has";

/// One `~label, ~id, parent_id, name` row of the vertex table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRow {
    pub label: String,
    pub id: String,
    pub parent_id: String,
    pub name: String,
}

/// One `~label, ~to, ~from, ~id` row of the edge table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub label: String,
    pub to: String,
    pub from: String,
    pub id: String,
}

/// Label for an asset id: the stem before the random-suffix separator.
/// Part ids collapse to the bare `part` label; their category stays in the
/// id (`part_{category}-{suffix}`).
pub fn label_of(id: &str) -> &str {
    if id.starts_with("part_") {
        return "part";
    }
    id.split_once('-').map_or(id, |(stem, _)| stem)
}

/// Flattens one subtree into vertex rows, insertion order preserved. The
/// tree is not consumed; flattening twice yields identical rows.
pub fn flatten(tree: &ScooterTree) -> Vec<VertexRow> {
    tree.nodes()
        .map(|(id, parent)| VertexRow {
            label: label_of(id).to_string(),
            id: id.to_string(),
            parent_id: parent.unwrap_or(ROOT_PARENT).to_string(),
            name: id.to_string(),
        })
        .collect()
}

/// Derives the edge table from a vertex table: roots are dropped, every
/// other row becomes one parent->child `has` edge under a fresh id.
pub fn derive_edges(vertices: &[VertexRow]) -> Vec<EdgeRow> {
    vertices
        .iter()
        .filter(|row| row.parent_id != ROOT_PARENT)
        .map(|row| EdgeRow {
            label: EDGE_LABEL.to_string(),
            to: row.id.clone(),
            from: row.parent_id.clone(),
            id: Uuid::new_v4().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::super::tree::build_scooter_subtree;
    use super::*;

    #[test]
    fn label_follows_the_id_stem() {
        assert_eq!(label_of("scooter-9XK2PQ"), "scooter");
        assert_eq!(label_of("legal_case-AB12CD"), "legal_case");
        assert_eq!(label_of("in_transit_journey-Z0Z0Z0"), "in_transit_journey");
        assert_eq!(label_of("payment_method-credit-card-visa"), "payment_method");
        assert_eq!(label_of("fleet_owner-evfast-scooters"), "fleet_owner");
        assert_eq!(label_of("weather_sunny-ws1"), "weather_sunny");
        assert_eq!(label_of("part_front_tyre-1A2B3C"), "part");
        assert_eq!(label_of("separatorless"), "separatorless");
    }

    #[test]
    fn only_the_root_carries_the_sentinel_parent() {
        let mut rng = StdRng::seed_from_u64(31);
        let tree = build_scooter_subtree(&mut rng, 2);
        let rows = flatten(&tree);

        let roots: Vec<&VertexRow> = rows.iter().filter(|r| r.parent_id == ROOT_PARENT).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, tree.root_id());
        assert_eq!(roots[0].label, "scooter");

        for row in &rows {
            assert_eq!(row.name, row.id);
            assert_eq!(row.label, label_of(&row.id));
        }
    }

    #[test]
    fn flatten_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(32);
        let tree = build_scooter_subtree(&mut rng, 3);
        assert_eq!(flatten(&tree), flatten(&tree));
    }

    #[test]
    fn edges_cover_exactly_the_non_root_rows() {
        let mut rng = StdRng::seed_from_u64(33);
        let tree = build_scooter_subtree(&mut rng, 5);
        let vertices = flatten(&tree);
        let edges = derive_edges(&vertices);

        assert_eq!(edges.len(), vertices.len() - 1);

        let vertex_ids: HashSet<&str> = vertices.iter().map(|r| r.id.as_str()).collect();
        let mut edge_ids = HashSet::new();
        for edge in &edges {
            assert_eq!(edge.label, EDGE_LABEL);
            assert!(vertex_ids.contains(edge.from.as_str()));
            assert!(vertex_ids.contains(edge.to.as_str()));
            assert_ne!(edge.from, edge.to);
            assert!(edge_ids.insert(edge.id.as_str()), "duplicate edge id {}", edge.id);
        }
    }
}
