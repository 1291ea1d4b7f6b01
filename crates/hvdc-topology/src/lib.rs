//! # hvdc-topology: HVDC Link Topology Resolution
//!
//! Determines, from an unordered bag of equipment and their node-adjacency
//! relationships, which equipment together form one HVDC link.
//!
//! ## Pipeline
//!
//! 1. [`adjacency::build`] - typed undirected multigraph over topological
//!    nodes plus a node-to-equipment index
//! 2. [`islands::find_islands`] - maximal connected components over all edge
//!    kinds
//! 3. [`ends::split_ends`] - split each island into its two electrical ends
//!    at the DC-line boundary
//! 4. [`ends::resolve_end`] - gather the transformers, converters and DC line
//!    segments attached to each end
//! 5. [`config::build_configurations`] - classify the two ends into candidate
//!    link configurations
//!
//! All structures here are owned by one resolution pass and discarded after
//! producing [`config::HvdcConfiguration`]s; nothing outlives the conversion
//! call that created it. Traversals share one BFS parameterized by an
//! edge-kind filter instead of per-caller copies.

pub mod adjacency;
pub mod config;
pub mod ends;
pub mod islands;
pub mod test_util;

pub use adjacency::{AdjacencyGraph, EdgeFilter, EdgeKind, EquipmentRef, NodeEquipmentIndex};
pub use config::{build_configurations, ConfigKind, HvdcConfiguration};
pub use ends::{resolve_end, split_ends, HvdcEnd, IslandEnd};
pub use islands::{find_islands, Island};
