//! Island detection: maximal connected components of the adjacency graph.

use crate::adjacency::{AdjacencyGraph, EdgeFilter};
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// One maximal set of topological nodes reachable from one another through
/// edges of any kind. Node order is BFS discovery order, kept only so results
/// are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    pub nodes: Vec<NodeIndex>,
}

/// Breadth-first labelling of connected components over all edge kinds.
///
/// Nodes without any edge are not part of any island. Iteration follows
/// interning order, so the result is deterministic for a given input.
pub fn find_islands(graph: &AdjacencyGraph) -> Vec<Island> {
    let mut visited = HashSet::new();
    let mut islands = Vec::new();
    for start in graph.nodes() {
        if visited.contains(&start) || !graph.has_edges(start) {
            continue;
        }
        let nodes = graph.closure(start, EdgeFilter::All, &mut visited, |_| true);
        islands.push(Island { nodes });
    }
    islands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build;
    use crate::test_util::{converter, segment};
    use hvdc_core::EquipmentSet;

    #[test]
    fn test_islands_partition_all_edge_touched_nodes() {
        let mut equipment = EquipmentSet::new();
        // Two separate links
        equipment.add_converter(converter("C1", "A1", &["D1"]));
        equipment.add_dc_line_segment(segment("L1", "D1", "D2", 1.0));
        equipment.add_converter(converter("C2", "A2", &["D2"]));
        equipment.add_converter(converter("C3", "A3", &["D3"]));
        equipment.add_dc_line_segment(segment("L2", "D3", "D4", 1.0));
        equipment.add_converter(converter("C4", "A4", &["D4"]));
        let (graph, _) = build(&equipment);

        let islands = find_islands(&graph);
        assert_eq!(islands.len(), 2);

        // Pairwise disjoint, union covers every node with an edge
        let mut seen = HashSet::new();
        for island in &islands {
            for &node in &island.nodes {
                assert!(seen.insert(node), "node appears in two islands");
            }
        }
        let with_edges: Vec<_> = graph.nodes().filter(|&n| graph.has_edges(n)).collect();
        assert_eq!(seen.len(), with_edges.len());
    }

    #[test]
    fn test_segment_edges_join_islands() {
        let mut equipment = EquipmentSet::new();
        equipment.add_converter(converter("C1", "A1", &["D1"]));
        equipment.add_dc_line_segment(segment("L1", "D1", "D2", 1.0));
        equipment.add_converter(converter("C2", "A2", &["D2"]));
        let (graph, _) = build(&equipment);

        let islands = find_islands(&graph);
        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].nodes.len(), 4);
    }

    #[test]
    fn test_empty_graph_has_no_islands() {
        let (graph, _) = build(&EquipmentSet::new());
        assert!(find_islands(&graph).is_empty());
    }

    #[test]
    fn test_deterministic_island_order() {
        let mut equipment = EquipmentSet::new();
        equipment.add_dc_line_segment(segment("L1", "D1", "D2", 1.0));
        equipment.add_dc_line_segment(segment("L2", "D3", "D4", 1.0));
        let (graph, _) = build(&equipment);

        let first = find_islands(&graph);
        let second = find_islands(&graph);
        assert_eq!(first, second);
        assert_eq!(graph.node_id(first[0].nodes[0]), "D1");
        assert_eq!(graph.node_id(first[1].nodes[0]), "D3");
    }
}
