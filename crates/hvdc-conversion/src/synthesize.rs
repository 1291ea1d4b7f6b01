//! Parameter synthesis: one classified configuration into converter stations
//! and a DC line.
//!
//! Synthesis never aborts the batch. A missing property record skips the
//! configuration with an `ignored` diagnostic; mismatched converter types and
//! impossible orientations are fatal for the configuration only and surface
//! as [`HvdcError`] values the orchestrator records before moving on.

use crate::loss_factor;
use hvdc_core::{
    AcDcConverterRecord, ConvertersMode, DcLineSegmentRecord, Diagnostics, EquipmentSet,
    HvdcError, HvdcLine, HvdcNetwork, HvdcResult, HvdcType, Kilovolts, LccConverterStation,
    Megavars, Megawatts, Ohms, VscConverterStation,
};
use hvdc_topology::{AdjacencyGraph, ConfigKind, HvdcConfiguration};
use std::collections::BTreeSet;

/// Floor for a DC line segment resistance reported as negative
const MIN_DC_RESISTANCE: f64 = 0.1;

/// Power factor applied to an LCC station when its `p`/`q` are unusable
const DEFAULT_POWER_FACTOR: f64 = 0.8;

/// Margin applied to the operating target to derive the line's `maxP`
const MAX_P_FACTOR: f64 = 1.2;

/// Which source equipment was consumed by synthesized configurations.
///
/// Owned by one conversion pass and threaded through every synthesis call;
/// equipment never marked here ends up in the unused-equipment report.
#[derive(Debug, Default)]
pub struct ConsumptionTracker {
    converters: BTreeSet<String>,
    dc_line_segments: BTreeSet<String>,
}

impl ConsumptionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_converter(&mut self, id: &str) {
        self.converters.insert(id.to_string());
    }

    pub fn mark_dc_line_segment(&mut self, id: &str) {
        self.dc_line_segments.insert(id.to_string());
    }

    pub fn converter_used(&self, id: &str) -> bool {
        self.converters.contains(id)
    }

    pub fn dc_line_segment_used(&self, id: &str) -> bool {
        self.dc_line_segments.contains(id)
    }

    pub fn converters_used(&self) -> usize {
        self.converters.len()
    }

    pub fn dc_line_segments_used(&self) -> usize {
        self.dc_line_segments.len()
    }
}

/// Synthesize one configuration into the destination network.
///
/// Returns the created line id, or `None` when the configuration was skipped
/// (missing property data; a diagnostic is recorded).
pub fn synthesize(
    equipment: &EquipmentSet,
    graph: &AdjacencyGraph,
    config: &HvdcConfiguration,
    network: &mut HvdcNetwork,
    tracker: &mut ConsumptionTracker,
    diag: &mut Diagnostics,
) -> HvdcResult<Option<String>> {
    let Some(converter_a) = equipment.converter(&config.converter1) else {
        diag.add_ignored("AcDcConverter", &config.converter1, "missing property data");
        return Ok(None);
    };
    let Some(converter_b) = equipment.converter(&config.converter2) else {
        diag.add_ignored("AcDcConverter", &config.converter2, "missing property data");
        return Ok(None);
    };
    let mut segments = Vec::with_capacity(config.dc_line_segments.len());
    for id in &config.dc_line_segments {
        let Some(segment) = equipment.dc_line_segment(id) else {
            diag.add_ignored("DcLineSegment", id, "missing property data");
            return Ok(None);
        };
        if !segment.connected1 || !segment.connected2 {
            diag.add_warning_with_entity(
                "connectivity",
                "terminal disconnected in the source model",
                &format!("DcLineSegment {}", segment.id),
            );
        }
        segments.push(segment);
    }
    let segment1 = segments[0];

    let converter_type = decode_type(converter_a)?;
    if converter_type != decode_type(converter_b)? {
        return Err(HvdcError::ConverterTypeMismatch {
            converter1: converter_a.id.clone(),
            converter2: converter_b.id.clone(),
        });
    }

    // Orient the pair so side 1 sits at the segment's terminal 1
    let (side1, side2) = orient(graph, converter_a, converter_b, segment1)?;

    let mode = decode_mode(converter_type, side1, side2, diag);
    let r = combined_resistance(config.kind, &segments, diag);
    let rated_udc = rated_dc_voltage(side1, side2);

    let p1 = side1.target_p_or_zero();
    let p2 = side2.target_p_or_zero();
    let factors = loss_factor::compute(mode, p1, p2, side1.pole_loss_p, side2.pole_loss_p, diag);
    let (max_p, setpoint) = operating_point(mode, side1, side2);

    let (station_id1, station_id2) = match converter_type {
        HvdcType::Vsc => (
            network.new_vsc_converter_station(vsc_station(side1, factors.factor1, diag)),
            network.new_vsc_converter_station(vsc_station(side2, factors.factor2, diag)),
        ),
        HvdcType::Lcc => (
            network.new_lcc_converter_station(lcc_station(side1, factors.factor1)),
            network.new_lcc_converter_station(lcc_station(side2, factors.factor2)),
        ),
    };

    let duplicated = matches!(config.kind, ConfigKind::SharedSegment { duplicated: true });
    let line_id = if duplicated {
        format!("{}-1", segment1.id)
    } else {
        segment1.id.clone()
    };
    let mut line = HvdcLine {
        id: line_id,
        name: segment1.name.clone(),
        r: Ohms(r),
        nominal_v: Kilovolts(rated_udc),
        active_power_setpoint: setpoint,
        max_p,
        converters_mode: mode,
        converter_station_id1: station_id1,
        converter_station_id2: station_id2,
        aliases: Vec::new(),
    };
    if config.kind == ConfigKind::ParallelSegments {
        line.add_alias(&segments[1].id, "DCLineSegment2");
    }
    let line_id = network.new_hvdc_line(line);

    tracker.mark_converter(&side1.id);
    tracker.mark_converter(&side2.id);
    for segment in &segments {
        tracker.mark_dc_line_segment(&segment.id);
    }
    Ok(Some(line_id))
}

fn decode_type(converter: &AcDcConverterRecord) -> HvdcResult<HvdcType> {
    match converter.type_tag.as_str() {
        "VsConverter" => Ok(HvdcType::Vsc),
        "CsConverter" => Ok(HvdcType::Lcc),
        other => Err(HvdcError::UnknownConverterType {
            converter: converter.id.clone(),
            tag: other.to_string(),
        }),
    }
}

/// Order the converter pair so the first returned record is electrically at
/// the segment's terminal-1 node: one of its DC nodes equals the node or is
/// one converter edge away from it.
fn orient<'a>(
    graph: &AdjacencyGraph,
    converter_a: &'a AcDcConverterRecord,
    converter_b: &'a AcDcConverterRecord,
    segment: &DcLineSegmentRecord,
) -> HvdcResult<(&'a AcDcConverterRecord, &'a AcDcConverterRecord)> {
    if converter_at_node(graph, converter_a, &segment.node1) {
        Ok((converter_a, converter_b))
    } else if converter_at_node(graph, converter_b, &segment.node1) {
        Ok((converter_b, converter_a))
    } else {
        Err(HvdcError::ConverterNotAtNode {
            converter1: converter_a.id.clone(),
            converter2: converter_b.id.clone(),
            node: segment.node1.clone(),
        })
    }
}

fn converter_at_node(graph: &AdjacencyGraph, converter: &AcDcConverterRecord, node: &str) -> bool {
    let Some(target) = graph.node_index(node) else {
        return false;
    };
    converter.dc_nodes.iter().any(|dc| {
        graph
            .node_index(dc)
            .is_some_and(|idx| idx == target || graph.adjacent_by_converter(idx, target))
    })
}

enum Role {
    Rectifier,
    Inverter,
}

fn role(operating_mode: &str) -> Option<Role> {
    let lower = operating_mode.to_ascii_lowercase();
    if lower.ends_with("inverter") {
        Some(Role::Inverter)
    } else if lower.ends_with("rectifier") {
        Some(Role::Rectifier)
    } else {
        None
    }
}

/// Decode the line's operating mode from the two converters.
///
/// Mode text wins over power sign. When the two mode strings do not form a
/// consistent inverter/rectifier pair, an LCC pair is assumed
/// rectifier-to-inverter with a warning; only VSC falls back to the sign of
/// the target powers, with the inverter condition checked first.
pub(crate) fn decode_mode(
    converter_type: HvdcType,
    side1: &AcDcConverterRecord,
    side2: &AcDcConverterRecord,
    diag: &mut Diagnostics,
) -> ConvertersMode {
    match (role(&side1.operating_mode), role(&side2.operating_mode)) {
        (Some(Role::Rectifier), Some(Role::Inverter)) => {
            ConvertersMode::Side1RectifierSide2Inverter
        }
        (Some(Role::Inverter), Some(Role::Rectifier)) => {
            ConvertersMode::Side1InverterSide2Rectifier
        }
        _ => match converter_type {
            HvdcType::Lcc => {
                diag.add_warning(
                    "mode",
                    "undefined converter mode, assumed Side1 Rectifier - Side2 Inverter",
                );
                ConvertersMode::Side1RectifierSide2Inverter
            }
            HvdcType::Vsc => {
                if side1.target_p_or_zero() < 0.0 || side2.target_p_or_zero() > 0.0 {
                    ConvertersMode::Side1InverterSide2Rectifier
                } else {
                    ConvertersMode::Side1RectifierSide2Inverter
                }
            }
        },
    }
}

fn clamped_resistance(segment: &DcLineSegmentRecord, diag: &mut Diagnostics) -> f64 {
    let r = if segment.r.is_nan() { 0.0 } else { segment.r };
    if r < 0.0 {
        diag.add_fixed("resistance", "was negative", r, MIN_DC_RESISTANCE);
        MIN_DC_RESISTANCE
    } else {
        r
    }
}

fn combined_resistance(
    kind: ConfigKind,
    segments: &[&DcLineSegmentRecord],
    diag: &mut Diagnostics,
) -> f64 {
    match kind {
        ConfigKind::SinglePair => clamped_resistance(segments[0], diag),
        // The shared segment is modeled once per converter pair; doubling
        // each copy keeps the parallel pair equal to the physical segment
        ConfigKind::SharedSegment { .. } => 2.0 * clamped_resistance(segments[0], diag),
        ConfigKind::ParallelSegments => {
            1.0 / (1.0 / clamped_resistance(segments[0], diag)
                + 1.0 / clamped_resistance(segments[1], diag))
        }
    }
}

fn rated_dc_voltage(side1: &AcDcConverterRecord, side2: &AcDcConverterRecord) -> f64 {
    for rated in [side1.rated_udc, side2.rated_udc] {
        if rated.is_finite() && rated != 0.0 {
            return rated;
        }
    }
    0.0
}

/// `maxP` heuristic and active power setpoint for one operating point.
///
/// The rectifier side is always the power source: its target magnitude drives
/// both values when present; otherwise the inverter magnitude stands in, with
/// both pole losses added back for the setpoint.
pub(crate) fn operating_point(
    mode: ConvertersMode,
    side1: &AcDcConverterRecord,
    side2: &AcDcConverterRecord,
) -> (Megawatts, Megawatts) {
    let (rectifier, inverter) = match mode {
        ConvertersMode::Side1RectifierSide2Inverter => (side1, side2),
        ConvertersMode::Side1InverterSide2Rectifier => (side2, side1),
    };
    let p_rect = rectifier.target_p_or_zero();
    let p_inv = inverter.target_p_or_zero();

    let max_p = if p_rect != 0.0 {
        MAX_P_FACTOR * p_rect.abs()
    } else {
        MAX_P_FACTOR * p_inv.abs()
    };
    let setpoint = if p_rect != 0.0 {
        p_rect.abs()
    } else {
        p_inv.abs() + rectifier.pole_loss_p + inverter.pole_loss_p
    };
    (Megawatts(max_p), Megawatts(setpoint))
}

fn vsc_station(
    converter: &AcDcConverterRecord,
    loss_factor: hvdc_core::Percent,
    diag: &mut Diagnostics,
) -> VscConverterStation {
    let mut station = VscConverterStation {
        id: converter.id.clone(),
        name: converter.name.clone(),
        loss_factor,
        voltage_regulator_on: false,
        voltage_setpoint: None,
        reactive_power_setpoint: None,
    };
    apply_vsc_regulation(&mut station, converter, diag);
    station
}

/// Decode a VSC's reactive control tag onto the station.
pub(crate) fn apply_vsc_regulation(
    station: &mut VscConverterStation,
    converter: &AcDcConverterRecord,
    diag: &mut Diagnostics,
) {
    station.voltage_regulator_on = false;
    station.voltage_setpoint = None;
    station.reactive_power_setpoint = None;

    let control = converter.q_pcc_control.as_deref().unwrap_or("");
    if control.ends_with("voltagePcc") {
        let target = converter.target_upcc.unwrap_or(f64::NAN);
        if target.is_finite() && target > 0.0 {
            station.voltage_regulator_on = true;
            station.voltage_setpoint = Some(Kilovolts(target));
        } else {
            diag.add_fixed("targetUpcc", "was invalid", target, 0.0);
        }
    } else if control.ends_with("reactivePcc") {
        station.reactive_power_setpoint =
            Some(Megavars(-converter.target_qpcc.unwrap_or(0.0)));
    } else {
        diag.add_warning_with_entity(
            "regulation",
            "unknown reactive power control mode, station left unregulated",
            &format!("VsConverter {}", converter.id),
        );
    }
}

fn lcc_station(
    converter: &AcDcConverterRecord,
    loss_factor: hvdc_core::Percent,
) -> LccConverterStation {
    LccConverterStation {
        id: converter.id.clone(),
        name: converter.name.clone(),
        loss_factor,
        power_factor: lcc_power_factor(converter),
    }
}

/// Power factor from the converter's measured `p`/`q` when both are usable.
pub(crate) fn lcc_power_factor(converter: &AcDcConverterRecord) -> f64 {
    match (converter.p, converter.q) {
        (Some(p), Some(q)) if p.is_finite() && q.is_finite() => {
            let apparent = p.hypot(q);
            let factor = p / apparent;
            if factor.is_finite() {
                factor
            } else {
                DEFAULT_POWER_FACTOR
            }
        }
        _ => DEFAULT_POWER_FACTOR,
    }
}
