//! Record builders shared by the topology and conversion test suites.

use hvdc_core::{AcDcConverterRecord, DcLineSegmentRecord, TransformerRecord};

/// A DC line segment between two DC topological nodes
pub fn segment(id: &str, node1: &str, node2: &str, r: f64) -> DcLineSegmentRecord {
    DcLineSegmentRecord {
        id: id.into(),
        name: id.into(),
        node1: node1.into(),
        node2: node2.into(),
        r,
        connected1: true,
        connected2: true,
    }
}

/// A VSC converter with default electrical attributes
pub fn converter(id: &str, ac_node: &str, dc_nodes: &[&str]) -> AcDcConverterRecord {
    AcDcConverterRecord {
        id: id.into(),
        name: id.into(),
        type_tag: "VsConverter".into(),
        operating_mode: String::new(),
        target_p: 0.0,
        pole_loss_p: 0.0,
        rated_udc: 0.0,
        ac_node: ac_node.into(),
        dc_nodes: dc_nodes.iter().map(|s| s.to_string()).collect(),
        q_pcc_control: None,
        target_upcc: None,
        target_qpcc: None,
        p: None,
        q: None,
    }
}

/// A transformer reduced to its terminal nodes
pub fn transformer(id: &str, nodes: &[&str]) -> TransformerRecord {
    TransformerRecord {
        id: id.into(),
        name: id.into(),
        nodes: nodes.iter().map(|s| s.to_string()).collect(),
    }
}
