use rand::Rng;

/// Closed set of part categories a scooter is assembled from.
pub const PART_CATEGORIES: &[&str] = &[
    "front_tyre",
    "back_tyre",
    "axle",
    "transmission",
    "suspension",
    "battery",
    "steering",
    "catalytic_converter",
    "ignition_pipe",
    "brake",
];

pub const DEFAULT_SUFFIX_LEN: usize = 6;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Asset stems that make up one scooter subtree. Stems with a fixed literal
/// id (weather, payment methods, fleet owners) live in the tree builder
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Scooter,
    Incident,
    LegalCase,
    Part,
    Manufacturer,
    LegalWarranty,
    InTransitJourney,
    Warehouse,
    ParkingStation,
    MaintenanceCenter,
    Driver,
    Fault,
    Warranty,
    ClaimFault,
}

impl AssetKind {
    pub fn stem(&self) -> &'static str {
        match self {
            AssetKind::Scooter => "scooter",
            AssetKind::Incident => "incident",
            AssetKind::LegalCase => "legal_case",
            AssetKind::Part => "part",
            AssetKind::Manufacturer => "manufacturer",
            AssetKind::LegalWarranty => "legal_warranty",
            AssetKind::InTransitJourney => "in_transit_journey",
            AssetKind::Warehouse => "warehouse",
            AssetKind::ParkingStation => "parking_station",
            AssetKind::MaintenanceCenter => "maintenance_center",
            AssetKind::Driver => "driver",
            AssetKind::Fault => "fault",
            AssetKind::Warranty => "warranty",
            AssetKind::ClaimFault => "claim_fault",
        }
    }
}

/// Uppercase-alphanumeric suffix of exactly `len` characters.
pub fn random_suffix<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect()
}

/// Randomized id for one asset: `{stem}-{SUFFIX}`, or for parts
/// `part_{category}-{SUFFIX}` with the category drawn uniformly from
/// [`PART_CATEGORIES`]. The suffix is drawn before the category so the
/// randomness stream has the same shape for every kind.
pub fn random_asset_name<R: Rng>(rng: &mut R, kind: AssetKind, suffix_len: usize) -> String {
    let suffix = random_suffix(rng, suffix_len);
    match kind {
        AssetKind::Part => {
            let category = PART_CATEGORIES[rng.random_range(0..PART_CATEGORIES.len())];
            format!("part_{category}-{suffix}")
        }
        other => format!("{}-{}", other.stem(), suffix),
    }
}
