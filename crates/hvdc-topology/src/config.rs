//! HVDC configuration classification.
//!
//! Two resolved ends combine into zero or more candidate links. Supported
//! patterns, keyed by (converter pairs, shared DC line segments):
//!
//! - (1, 1) simple point-to-point, single pole modeled
//! - (2, 1) two converter pairs over one shared segment (bipolar or parallel
//!   converters); the segment is modeled twice, once per pair
//! - (1, 2) one converter pair over two parallel segments, impedances
//!   combined at synthesis
//!
//! Anything else is a fatal configuration error naming the counts.

use crate::ends::HvdcEnd;
use hvdc_core::{HvdcError, HvdcResult};

/// How the configuration's DC conductors map onto synthesized lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// One pair, one segment: the segment's own resistance
    SinglePair,
    /// Two pairs share one segment: each line models the segment at twice its
    /// resistance so the parallel pair reproduces it. The duplicated line
    /// gets a derived id.
    SharedSegment { duplicated: bool },
    /// One pair over two parallel segments: resistances combine in parallel
    ParallelSegments,
}

/// A candidate HVDC link ready for parameter synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HvdcConfiguration {
    /// Converter acting at end 1
    pub converter1: String,
    /// Converter acting at end 2
    pub converter2: String,
    /// DC line segments actually linking the two ends (1 or 2)
    pub dc_line_segments: Vec<String>,
    pub kind: ConfigKind,
}

/// Combine two resolved ends into candidate configurations.
///
/// Ends without converters yield no configuration (the caller records the
/// island as ignored). Converter ids pair index-wise in sorted order; the
/// topology offers no further distinction between poles that share both
/// segment terminals.
pub fn build_configurations(end1: &HvdcEnd, end2: &HvdcEnd) -> HvdcResult<Vec<HvdcConfiguration>> {
    if end1.converters.is_empty() || end2.converters.is_empty() {
        return Ok(Vec::new());
    }

    let converters1: Vec<&String> = end1.converters.iter().collect();
    let converters2: Vec<&String> = end2.converters.iter().collect();
    let shared: Vec<&String> = end1
        .dc_line_segments
        .intersection(&end2.dc_line_segments)
        .collect();

    let pairs = converters1.len().max(converters2.len());
    if converters1.len() != converters2.len() {
        return Err(HvdcError::UnsupportedConfiguration {
            converters: pairs,
            segments: shared.len(),
        });
    }

    match (pairs, shared.len()) {
        (1, 1) => Ok(vec![HvdcConfiguration {
            converter1: converters1[0].clone(),
            converter2: converters2[0].clone(),
            dc_line_segments: vec![shared[0].clone()],
            kind: ConfigKind::SinglePair,
        }]),
        (2, 1) => Ok(converters1
            .iter()
            .zip(&converters2)
            .enumerate()
            .map(|(i, (c1, c2))| HvdcConfiguration {
                converter1: (*c1).clone(),
                converter2: (*c2).clone(),
                dc_line_segments: vec![shared[0].clone()],
                kind: ConfigKind::SharedSegment { duplicated: i == 1 },
            })
            .collect()),
        (1, 2) => Ok(vec![HvdcConfiguration {
            converter1: converters1[0].clone(),
            converter2: converters2[0].clone(),
            dc_line_segments: shared.iter().map(|s| (*s).clone()).collect(),
            kind: ConfigKind::ParallelSegments,
        }]),
        (converters, segments) => Err(HvdcError::UnsupportedConfiguration {
            converters,
            segments,
        }),
    }
}
