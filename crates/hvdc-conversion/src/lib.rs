//! # hvdc-conversion: HVDC Parameter Synthesis
//!
//! Turns flat equipment records into converter stations and DC lines. The
//! topology stage (`hvdc-topology`) answers *which* equipment forms a link;
//! this crate answers *with what parameters*:
//!
//! - [`loss_factor`] - converter loss factors from targets and pole losses
//! - [`synthesize`] - one classified configuration into stations plus a line
//! - [`update`] - in-place refresh of a line after targets change
//! - [`convert`] - the full pipeline over one equipment set
//!
//! Expected data problems never abort the pass: a bad value is fixed or the
//! configuration skipped, with a diagnostic either way, and equipment no
//! configuration consumed is listed in the returned [`ConversionReport`].

pub mod loss_factor;
pub mod synthesize;
pub mod update;

pub use loss_factor::LossFactors;
pub use synthesize::ConsumptionTracker;
pub use update::update_hvdc_line;

use hvdc_core::{ConversionReport, Diagnostics, EquipmentSet, HvdcNetwork};
use hvdc_topology::{adjacency, build_configurations, find_islands, resolve_end, split_ends};

/// Run the full conversion pipeline over one equipment set.
///
/// Builds the node-adjacency graph, partitions it into islands, resolves and
/// classifies each island's ends, and synthesizes every supported
/// configuration into `network`. Unsupported islands are reported and
/// skipped; the rest of the pass is unaffected.
pub fn convert(equipment: &EquipmentSet, network: &mut HvdcNetwork) -> ConversionReport {
    let mut report = ConversionReport::new();
    if equipment.is_empty() {
        return report;
    }

    let mut diag = Diagnostics::new();
    let mut tracker = synthesize::ConsumptionTracker::new();
    let (graph, index) = adjacency::build(equipment);
    let islands = find_islands(&graph);
    report.stats.islands = islands.len();

    for island in &islands {
        let island_ref = graph.node_id(island.nodes[0]);
        let Some((end1, end2)) = split_ends(&graph, island) else {
            diag.add_ignored("Island", island_ref, "no DC line boundary between two ends");
            continue;
        };
        let resolved1 = resolve_end(&graph, &index, &end1);
        let resolved2 = resolve_end(&graph, &index, &end2);
        if resolved1.is_empty() && resolved2.is_empty() {
            diag.add_ignored("Island", island_ref, "no equipment resolved at either end");
            continue;
        }

        let configs = match build_configurations(&resolved1, &resolved2) {
            Ok(configs) => configs,
            Err(err) => {
                diag.add_error("configuration", &err.to_string());
                continue;
            }
        };
        if configs.is_empty() {
            diag.add_ignored("Island", island_ref, "an end resolved without converters");
            continue;
        }
        report.stats.configurations += configs.len();

        for config in &configs {
            match synthesize::synthesize(
                equipment,
                &graph,
                config,
                network,
                &mut tracker,
                &mut diag,
            ) {
                Ok(Some(_)) => report.stats.hvdc_lines += 1,
                Ok(None) => {}
                Err(err) => diag.add_error("configuration", &err.to_string()),
            }
        }
    }

    for converter in equipment.converters() {
        if !tracker.converter_used(&converter.id) {
            diag.add_ignored(
                "AcDcConverter",
                &converter.id,
                "not consumed by any configuration",
            );
            report.unused_converters.push(converter.id.clone());
        }
    }
    for segment in equipment.dc_line_segments() {
        if !tracker.dc_line_segment_used(&segment.id) {
            diag.add_ignored(
                "DcLineSegment",
                &segment.id,
                "not consumed by any configuration",
            );
            report.unused_dc_line_segments.push(segment.id.clone());
        }
    }

    report.stats.converters_used = tracker.converters_used();
    report.stats.dc_line_segments_used = tracker.dc_line_segments_used();
    report.diagnostics = diag;
    report
}
