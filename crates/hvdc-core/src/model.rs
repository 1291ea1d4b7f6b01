//! Flat source-model equipment records.
//!
//! The exchange model is consumed as an unordered bag of records keyed by
//! topological-node references. [`EquipmentSet`] is the narrow surface the
//! pipeline reads: iteration over each record kind plus lookup by id for the
//! synthesis and update stages. Nothing here owns topology; which records
//! together form one HVDC link is decided later by the resolver.

use std::collections::HashMap;

/// Kind tag attached to every node an equipment touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentKind {
    Transformer,
    AcDcConverter,
    DcLineSegment,
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EquipmentKind::Transformer => "Transformer",
            EquipmentKind::AcDcConverter => "AcDcConverter",
            EquipmentKind::DcLineSegment => "DcLineSegment",
        };
        write!(f, "{name}")
    }
}

/// One DC line segment record: a conductor between two DC topological nodes
#[derive(Debug, Clone)]
pub struct DcLineSegmentRecord {
    pub id: String,
    pub name: String,
    /// Topological node at terminal 1
    pub node1: String,
    /// Topological node at terminal 2
    pub node2: String,
    /// Series resistance in ohms (may be negative in bad data)
    pub r: f64,
    /// Terminal connection status
    pub connected1: bool,
    pub connected2: bool,
}

/// One AC/DC converter record: one AC terminal, one or more DC terminals
#[derive(Debug, Clone)]
pub struct AcDcConverterRecord {
    pub id: String,
    pub name: String,
    /// Converter type tag: "VsConverter" or "CsConverter"
    pub type_tag: String,
    /// Operating mode tag, suffix "...inverter" or "...rectifier"
    pub operating_mode: String,
    /// Real power injection target at the point of common coupling (MW)
    pub target_p: f64,
    /// Active power loss at the DC pole (MW)
    pub pole_loss_p: f64,
    /// Rated DC voltage (kV), 0 when absent
    pub rated_udc: f64,
    /// Topological node of the single AC terminal
    pub ac_node: String,
    /// Topological nodes of the DC terminals (one or more)
    pub dc_nodes: Vec<String>,
    /// VSC reactive control tag, suffix "...voltagePcc" or "...reactivePcc"
    pub q_pcc_control: Option<String>,
    /// VSC voltage regulation target (kV)
    pub target_upcc: Option<f64>,
    /// VSC reactive power target (Mvar)
    pub target_qpcc: Option<f64>,
    /// LCC measured active power at the AC terminal (MW)
    pub p: Option<f64>,
    /// LCC measured reactive power at the AC terminal (Mvar)
    pub q: Option<f64>,
}

impl AcDcConverterRecord {
    /// Target AC power, with NaN read as 0 (disconnected station)
    pub fn target_p_or_zero(&self) -> f64 {
        if self.target_p.is_nan() {
            0.0
        } else {
            self.target_p
        }
    }
}

/// One 2- or 3-winding transformer record, reduced to its terminal nodes
#[derive(Debug, Clone)]
pub struct TransformerRecord {
    pub id: String,
    pub name: String,
    /// Topological nodes of the terminals (2 or 3)
    pub nodes: Vec<String>,
}

/// The full bag of HVDC-relevant equipment for one conversion pass.
///
/// Insertion order is preserved for every record kind; the pipeline relies on
/// it for deterministic results, never for semantics.
#[derive(Debug, Clone, Default)]
pub struct EquipmentSet {
    dc_line_segments: Vec<DcLineSegmentRecord>,
    converters: Vec<AcDcConverterRecord>,
    transformers: Vec<TransformerRecord>,
    segment_index: HashMap<String, usize>,
    converter_index: HashMap<String, usize>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dc_line_segment(&mut self, record: DcLineSegmentRecord) {
        self.segment_index
            .insert(record.id.clone(), self.dc_line_segments.len());
        self.dc_line_segments.push(record);
    }

    pub fn add_converter(&mut self, record: AcDcConverterRecord) {
        self.converter_index
            .insert(record.id.clone(), self.converters.len());
        self.converters.push(record);
    }

    pub fn add_transformer(&mut self, record: TransformerRecord) {
        self.transformers.push(record);
    }

    /// Iterate DC line segments in insertion order
    pub fn dc_line_segments(&self) -> &[DcLineSegmentRecord] {
        &self.dc_line_segments
    }

    /// Iterate AC/DC converters in insertion order
    pub fn converters(&self) -> &[AcDcConverterRecord] {
        &self.converters
    }

    /// Iterate transformers in insertion order
    pub fn transformers(&self) -> &[TransformerRecord] {
        &self.transformers
    }

    /// Look up one converter's property record by id
    pub fn converter(&self, id: &str) -> Option<&AcDcConverterRecord> {
        self.converter_index.get(id).map(|&i| &self.converters[i])
    }

    /// Look up one DC line segment's property record by id
    pub fn dc_line_segment(&self, id: &str) -> Option<&DcLineSegmentRecord> {
        self.segment_index
            .get(id)
            .map(|&i| &self.dc_line_segments[i])
    }

    pub fn is_empty(&self) -> bool {
        self.dc_line_segments.is_empty() && self.converters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str) -> DcLineSegmentRecord {
        DcLineSegmentRecord {
            id: id.into(),
            name: id.into(),
            node1: "D1".into(),
            node2: "D2".into(),
            r: 1.0,
            connected1: true,
            connected2: true,
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let mut equipment = EquipmentSet::new();
        equipment.add_dc_line_segment(segment("L1"));
        equipment.add_dc_line_segment(segment("L2"));

        assert_eq!(equipment.dc_line_segment("L2").unwrap().id, "L2");
        assert!(equipment.dc_line_segment("L3").is_none());
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut equipment = EquipmentSet::new();
        equipment.add_dc_line_segment(segment("B"));
        equipment.add_dc_line_segment(segment("A"));

        let ids: Vec<_> = equipment
            .dc_line_segments()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_target_p_nan_reads_as_zero() {
        let converter = AcDcConverterRecord {
            id: "C1".into(),
            name: "C1".into(),
            type_tag: "VsConverter".into(),
            operating_mode: String::new(),
            target_p: f64::NAN,
            pole_loss_p: 0.0,
            rated_udc: 400.0,
            ac_node: "A1".into(),
            dc_nodes: vec!["D1".into()],
            q_pcc_control: None,
            target_upcc: None,
            target_qpcc: None,
            p: None,
            q: None,
        };
        assert_eq!(converter.target_p_or_zero(), 0.0);
    }
}
