pub mod fleet;
pub mod naming;
pub mod odds;
pub mod tables;
pub mod tree;

pub use fleet::{FleetGenerator, FleetSettings, GeneratedTables};
pub use tables::{EDGE_LABEL, EdgeRow, ROOT_PARENT, VertexRow, derive_edges, flatten, label_of};
pub use tree::{ScooterTree, build_scooter_subtree, render_tree};
