pub mod client;

pub use client::{GraphClient, QueryError, subtree_traversal};
