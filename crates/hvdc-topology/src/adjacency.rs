//! Adjacency graph and node-equipment index over topological nodes.
//!
//! Topological nodes arrive as opaque string ids. They are interned once into
//! petgraph node indices (the node weight keeps the original id for external
//! interfaces), so the BFS-heavy downstream steps never hash strings. Edges
//! carry the equipment kind that created them, which lets every traversal pick
//! the edge kinds it is willing to follow.

use hvdc_core::{EquipmentKind, EquipmentSet};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use std::collections::{HashMap, HashSet, VecDeque};

/// Kind of an adjacency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    DcLineSegment,
    AcDcConverter,
}

/// Which edge kinds a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFilter {
    /// Follow every edge (island detection)
    All,
    /// Follow converter edges only, stopping at the DC-line boundary
    ConverterOnly,
}

impl EdgeFilter {
    fn admits(self, kind: EdgeKind) -> bool {
        match self {
            EdgeFilter::All => true,
            EdgeFilter::ConverterOnly => kind == EdgeKind::AcDcConverter,
        }
    }
}

/// One equipment attachment at a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRef {
    pub kind: EquipmentKind,
    pub id: String,
}

/// Undirected multigraph over interned topological nodes.
///
/// Multiple edges between the same pair are allowed (several converters may
/// share two nodes); petgraph stores parallel edges natively.
#[derive(Debug, Default)]
pub struct AdjacencyGraph {
    graph: Graph<String, EdgeKind, Undirected>,
    index: HashMap<String, NodeIndex>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a topological node id, returning its index
    pub fn intern(&mut self, node_id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(node_id) {
            return idx;
        }
        let idx = self.graph.add_node(node_id.to_string());
        self.index.insert(node_id.to_string(), idx);
        idx
    }

    /// Look up an already interned node
    pub fn node_index(&self, node_id: &str) -> Option<NodeIndex> {
        self.index.get(node_id).copied()
    }

    /// Original id of an interned node
    pub fn node_id(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, kind: EdgeKind) {
        self.graph.add_edge(a, b, kind);
    }

    /// All interned nodes in interning order
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// Whether the node has at least one edge of any kind
    pub fn has_edges(&self, node: NodeIndex) -> bool {
        self.graph.edges(node).next().is_some()
    }

    /// No edges at all means there is nothing to resolve
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Neighbors reachable through edges admitted by `filter`
    pub fn neighbors_filtered(
        &self,
        node: NodeIndex,
        filter: EdgeFilter,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.edges(node).filter_map(move |edge| {
            if !filter.admits(*edge.weight()) {
                return None;
            }
            Some(if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            })
        })
    }

    /// Whether two nodes share at least one converter edge
    pub fn adjacent_by_converter(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.neighbors_filtered(a, EdgeFilter::ConverterOnly)
            .any(|n| n == b)
    }

    /// Breadth-first closure of `seed`, following edges admitted by `filter`.
    ///
    /// Nodes already in `visited` are never re-entered; every newly reached
    /// node is added to `visited`. A node for which `expand` returns false is
    /// still collected but its own edges are not followed. The returned list
    /// is in discovery order, which downstream code uses only for determinism.
    pub fn closure(
        &self,
        seed: NodeIndex,
        filter: EdgeFilter,
        visited: &mut HashSet<NodeIndex>,
        expand: impl Fn(NodeIndex) -> bool,
    ) -> Vec<NodeIndex> {
        let mut reached = Vec::new();
        if !visited.insert(seed) {
            return reached;
        }
        let mut queue = VecDeque::new();
        queue.push_back(seed);
        while let Some(node) = queue.pop_front() {
            reached.push(node);
            if !expand(node) {
                continue;
            }
            for neighbor in self.neighbors_filtered(node, filter) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        reached
    }
}

/// Maps each topological node to the equipment touching it
#[derive(Debug, Default)]
pub struct NodeEquipmentIndex {
    attached: HashMap<NodeIndex, Vec<EquipmentRef>>,
}

impl NodeEquipmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an equipment reference to a node; attaching the same
    /// `(kind, id)` twice is idempotent.
    pub fn attach(&mut self, node: NodeIndex, kind: EquipmentKind, id: &str) {
        let refs = self.attached.entry(node).or_default();
        if refs.iter().any(|r| r.kind == kind && r.id == id) {
            return;
        }
        refs.push(EquipmentRef {
            kind,
            id: id.to_string(),
        });
    }

    /// All equipment attached to a node, in attachment order
    pub fn equipment(&self, node: NodeIndex) -> &[EquipmentRef] {
        self.attached.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_transformer(&self, node: NodeIndex) -> bool {
        self.equipment(node)
            .iter()
            .any(|r| r.kind == EquipmentKind::Transformer)
    }

    pub fn has_converter(&self, node: NodeIndex) -> bool {
        self.equipment(node)
            .iter()
            .any(|r| r.kind == EquipmentKind::AcDcConverter)
    }

    /// Number of distinct AC/DC converter ids attached to a node.
    ///
    /// Two or more distinct converters on one node mark an ambiguous merge
    /// point where separate HVDC links' converters coincide.
    pub fn distinct_converter_count(&self, node: NodeIndex) -> usize {
        self.equipment(node)
            .iter()
            .filter(|r| r.kind == EquipmentKind::AcDcConverter)
            .count()
    }
}

/// Build the adjacency graph and node-equipment index from the raw records.
///
/// Converters are indexed before transformers: a transformer is only relevant
/// when at least one of its terminal nodes already carries a converter
/// reference, which keeps the rest of the AC network out of the index.
pub fn build(equipment: &EquipmentSet) -> (AdjacencyGraph, NodeEquipmentIndex) {
    let mut graph = AdjacencyGraph::new();
    let mut index = NodeEquipmentIndex::new();

    for segment in equipment.dc_line_segments() {
        let n1 = graph.intern(&segment.node1);
        let n2 = graph.intern(&segment.node2);
        graph.add_edge(n1, n2, EdgeKind::DcLineSegment);
        index.attach(n1, EquipmentKind::DcLineSegment, &segment.id);
        index.attach(n2, EquipmentKind::DcLineSegment, &segment.id);
    }

    for converter in equipment.converters() {
        let ac = graph.intern(&converter.ac_node);
        index.attach(ac, EquipmentKind::AcDcConverter, &converter.id);
        let dc_nodes: Vec<NodeIndex> = converter
            .dc_nodes
            .iter()
            .map(|n| graph.intern(n))
            .collect();
        for &dc in &dc_nodes {
            graph.add_edge(ac, dc, EdgeKind::AcDcConverter);
            index.attach(dc, EquipmentKind::AcDcConverter, &converter.id);
        }
        // Multi-terminal converters also tie their DC nodes together
        for (i, &dc1) in dc_nodes.iter().enumerate() {
            for &dc2 in &dc_nodes[i + 1..] {
                graph.add_edge(dc1, dc2, EdgeKind::AcDcConverter);
            }
        }
    }

    for transformer in equipment.transformers() {
        let adjacent_to_converter = transformer.nodes.iter().any(|n| {
            graph
                .node_index(n)
                .is_some_and(|idx| index.has_converter(idx))
        });
        if !adjacent_to_converter {
            continue;
        }
        for node in &transformer.nodes {
            let idx = graph.intern(node);
            index.attach(idx, EquipmentKind::Transformer, &transformer.id);
        }
    }

    (graph, index)
}
