use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::tables::{EdgeRow, VertexRow, derive_edges, flatten};
use super::tree::build_scooter_subtree;

/// Resolved generation parameters. Counts arrive through config/env as
/// integers or numeric strings and are coerced before they get here.
#[derive(Debug, Clone)]
pub struct FleetSettings {
    pub scooters: u32,
    pub parts_per_scooter: u32,
    /// Fixed seed for reproducible runs; fresh OS entropy otherwise.
    pub seed: Option<u64>,
}

/// Both loader tables from one generation run.
#[derive(Debug)]
pub struct GeneratedTables {
    pub vertices: Vec<VertexRow>,
    pub edges: Vec<EdgeRow>,
}

/// Single source of truth for one generation batch: builds every scooter
/// subtree, flattens them into one growing vertex table, then derives the
/// edge table once.
///
/// The whole batch is built synchronously in memory before anything is
/// persisted, which bounds feasible scale to demo volumes (around 360k
/// nodes for 10k scooters with 10 parts each, low single-digit seconds).
pub struct FleetGenerator {
    settings: FleetSettings,
}

impl FleetGenerator {
    pub fn new(settings: FleetSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FleetSettings {
        &self.settings
    }

    pub fn generate(&self) -> GeneratedTables {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with(&mut rng)
    }

    /// Generation against a caller-owned generator handle. Parallel callers
    /// must partition seeds themselves; nothing here is shared.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> GeneratedTables {
        let mut vertices = Vec::new();
        for _ in 0..self.settings.scooters {
            let tree = build_scooter_subtree(rng, self.settings.parts_per_scooter);
            vertices.extend(flatten(&tree));
        }
        let edges = derive_edges(&vertices);

        info!(
            scooters = self.settings.scooters,
            parts_per_scooter = self.settings.parts_per_scooter,
            vertex_rows = vertices.len(),
            edge_rows = edges.len(),
            "fleet tables generated"
        );
        GeneratedTables { vertices, edges }
    }
}
