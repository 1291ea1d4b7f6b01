//! Island end splitting and per-end equipment resolution.
//!
//! An island that represents an HVDC link has exactly two electrical "ends"
//! separated by its DC conductors. Splitting walks converter edges only, so
//! the closure stops at the DC-line boundary and keeps one side of the link
//! together. Equipment resolution then re-walks each end from its
//! transformer-bearing nodes, refusing to expand through nodes where two
//! distinct converters coincide (a meshed point that must not be merged
//! silently).

use crate::adjacency::{AdjacencyGraph, EdgeFilter, NodeEquipmentIndex};
use crate::islands::Island;
use hvdc_core::EquipmentKind;
use petgraph::graph::NodeIndex;
use std::collections::{BTreeSet, HashSet};

/// One half of an island, in BFS discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandEnd {
    pub nodes: Vec<NodeIndex>,
}

/// Equipment resolved for one island end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HvdcEnd {
    pub transformers: BTreeSet<String>,
    pub converters: BTreeSet<String>,
    pub dc_line_segments: BTreeSet<String>,
}

impl HvdcEnd {
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
            && self.converters.is_empty()
            && self.dc_line_segments.is_empty()
    }
}

/// Partition an island into its two ends.
///
/// End 1 is the converter-edge closure of the island's first node; end 2 the
/// closure of the first node end 1 did not reach. Returns `None` for an empty
/// island or when every node is reachable without crossing a DC line segment
/// (a single-ended island cannot be a two-sided link).
pub fn split_ends(graph: &AdjacencyGraph, island: &Island) -> Option<(IslandEnd, IslandEnd)> {
    let first = *island.nodes.first()?;
    let mut visited = HashSet::new();
    let end1 = graph.closure(first, EdgeFilter::ConverterOnly, &mut visited, |_| true);

    let second = island.nodes.iter().find(|n| !visited.contains(n))?;
    let end2 = graph.closure(*second, EdgeFilter::ConverterOnly, &mut visited, |_| true);

    Some((IslandEnd { nodes: end1 }, IslandEnd { nodes: end2 }))
}

/// Resolve the equipment attached to one island end.
///
/// Seeds are the end's transformer-bearing nodes; each unvisited seed expands
/// through converter edges, and a node carrying two or more distinct
/// converters is collected but never expanded. Equipment ids are gathered
/// into sets, so repeated attachment of the same id is idempotent. An end
/// without any transformer-bearing node resolves to an empty `HvdcEnd`.
pub fn resolve_end(
    graph: &AdjacencyGraph,
    index: &NodeEquipmentIndex,
    end: &IslandEnd,
) -> HvdcEnd {
    let mut visited = HashSet::new();
    let mut reached = Vec::new();
    for &seed in end.nodes.iter().filter(|&&n| index.has_transformer(n)) {
        reached.extend(graph.closure(seed, EdgeFilter::ConverterOnly, &mut visited, |n| {
            index.distinct_converter_count(n) < 2
        }));
    }

    let mut resolved = HvdcEnd::default();
    for node in reached {
        for equipment in index.equipment(node) {
            let set = match equipment.kind {
                EquipmentKind::Transformer => &mut resolved.transformers,
                EquipmentKind::AcDcConverter => &mut resolved.converters,
                EquipmentKind::DcLineSegment => &mut resolved.dc_line_segments,
            };
            set.insert(equipment.id.clone());
        }
    }
    resolved
}
