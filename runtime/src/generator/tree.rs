use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use rand::Rng;

use super::naming::{AssetKind, DEFAULT_SUFFIX_LEN, random_asset_name};
use super::odds::{choose, gate};

const WEATHER_SUNNY: &str = "weather_sunny-ws1";
const WEATHER_CLOUDY: &str = "weather_cloudy-wc3";
const WEATHER_RAINY: &str = "weather_rainy-wr2";
const WEATHER_ODDS: [(u32, &str); 2] = [(3, WEATHER_SUNNY), (2, WEATHER_CLOUDY)];

const PAYMENT_ODDS: [(u32, &str); 3] = [
    (4, "payment_method-credit-card-visa"),
    (3, "payment_method-credit-card-mastercard"),
    (3, "payment_method-google-pay"),
];
const PAYMENT_FALLBACK: &str = "payment_method-apple-pay";

const OWNER_ODDS: [(u32, &str); 2] = [
    (4, "fleet_owner-pegasus-scooters"),
    (3, "fleet_owner-pineapple-scooters"),
];
const OWNER_FALLBACK: &str = "fleet_owner-evfast-scooters";

/// One scooter's entity subtree. Node weights are asset ids; edges point
/// parent -> child. Node indices are insertion-ordered, which fixes the
/// flattening and rendering order.
pub struct ScooterTree {
    graph: DiGraph<String, ()>,
    root: NodeIndex,
}

impl ScooterTree {
    fn new(root_id: String) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root_id);
        Self { graph, root }
    }

    fn attach(&mut self, parent: NodeIndex, id: String) -> NodeIndex {
        let child = self.graph.add_node(id);
        self.graph.add_edge(parent, child, ());
        child
    }

    pub fn root_id(&self) -> &str {
        &self.graph[self.root]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// `(id, parent_id)` pairs in insertion order; the root has no parent.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.graph.node_indices().map(|idx| {
            let parent = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .map(|p| self.graph[p].as_str());
            (self.graph[idx].as_str(), parent)
        })
    }
}

/// Builds one scooter's full subtree. The branch order below is observable:
/// every branch consumes randomness sequentially, so callers holding a fixed
/// seed get the same tree bit for bit.
pub fn build_scooter_subtree<R: Rng>(rng: &mut R, part_count: u32) -> ScooterTree {
    let mut tree = ScooterTree::new(random_asset_name(rng, AssetKind::Scooter, DEFAULT_SUFFIX_LEN));
    let root = tree.root;

    // A small share of scooters had an incident, each with a legal case.
    if gate(rng, 10) {
        let incident = tree.attach(
            root,
            random_asset_name(rng, AssetKind::Incident, DEFAULT_SUFFIX_LEN),
        );
        tree.attach(
            incident,
            random_asset_name(rng, AssetKind::LegalCase, DEFAULT_SUFFIX_LEN),
        );
    }

    // Parts, each with its manufacturer and legal warranty.
    let mut last_part = None;
    for _ in 0..part_count {
        let part = tree.attach(root, random_asset_name(rng, AssetKind::Part, DEFAULT_SUFFIX_LEN));
        tree.attach(part, random_asset_name(rng, AssetKind::Manufacturer, 2));
        tree.attach(
            part,
            random_asset_name(rng, AssetKind::LegalWarranty, DEFAULT_SUFFIX_LEN),
        );
        last_part = Some(part);
    }

    // Location. Most scooters are out on a journey; the parked ones fall
    // through warehouse, parking station and maintenance center in priority
    // order, ending back in transit when nothing sticks.
    if !gate(rng, 3) {
        let journey = tree.attach(
            root,
            random_asset_name(rng, AssetKind::InTransitJourney, DEFAULT_SUFFIX_LEN),
        );
        let weather = *choose(rng, &WEATHER_ODDS, &WEATHER_RAINY);
        tree.attach(journey, weather.to_string());
    } else if gate(rng, 10) {
        tree.attach(root, random_asset_name(rng, AssetKind::Warehouse, 1));
    } else if gate(rng, 2) {
        tree.attach(root, random_asset_name(rng, AssetKind::ParkingStation, 2));
    } else if gate(rng, 10) {
        tree.attach(root, random_asset_name(rng, AssetKind::MaintenanceCenter, 2));
    } else {
        tree.attach(
            root,
            random_asset_name(rng, AssetKind::InTransitJourney, DEFAULT_SUFFIX_LEN),
        );
    }

    // Driver and how they pay.
    let driver = tree.attach(root, random_asset_name(rng, AssetKind::Driver, DEFAULT_SUFFIX_LEN));
    let payment = *choose(rng, &PAYMENT_ODDS, &PAYMENT_FALLBACK);
    tree.attach(driver, payment.to_string());

    // Faults land on the last part built; only some grow into a claim. The
    // gate fires for part-less scooters too (keeps the draw sequence shape)
    // but then has nothing to attach to.
    if gate(rng, 4) {
        if let Some(part) = last_part {
            let fault = tree.attach(part, random_asset_name(rng, AssetKind::Fault, 2));
            tree.attach(
                fault,
                random_asset_name(rng, AssetKind::Warranty, DEFAULT_SUFFIX_LEN),
            );
            if gate(rng, 4) {
                tree.attach(
                    fault,
                    random_asset_name(rng, AssetKind::ClaimFault, DEFAULT_SUFFIX_LEN),
                );
            }
        }
    }

    // Exactly one fleet owner per scooter.
    let owner = *choose(rng, &OWNER_ODDS, &OWNER_FALLBACK);
    tree.attach(root, owner.to_string());

    tree
}

/// ASCII rendering of the subtree, one asset per line, children indented
/// under their owner.
pub fn render_tree(tree: &ScooterTree) -> String {
    let mut out = String::new();
    render_node(&tree.graph, tree.root, 0, &mut out);
    out
}

fn render_node(graph: &DiGraph<String, ()>, node: NodeIndex, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&graph[node]);
    out.push('\n');

    // neighbors_directed walks edges newest first; sorting restores the
    // order the children were attached in.
    let mut children: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
    children.sort();
    for child in children {
        render_node(graph, child, depth + 1, out);
    }
}
