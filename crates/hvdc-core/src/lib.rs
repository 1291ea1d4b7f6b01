//! # hvdc-core: HVDC Conversion Core
//!
//! Fundamental data structures for resolving HVDC links out of a flat
//! power-grid exchange model.
//!
//! ## Design Philosophy
//!
//! The source model arrives as an unordered bag of equipment records (DC line
//! segments, AC/DC converters, transformers), each identified by
//! topological-node references. This crate owns the two ends of the pipeline:
//!
//! - **Source side**: [`model::EquipmentSet`] - flat records with iteration
//!   and id lookup, nothing more
//! - **Destination side**: [`network::HvdcNetwork`] - converter stations and
//!   DC lines with their synthesized electrical parameters
//!
//! Everything in between (adjacency graph, island detection, configuration
//! classification, parameter synthesis) lives in the `hvdc-topology` and
//! `hvdc-conversion` crates.
//!
//! ## Modules
//!
//! - [`model`] - source equipment records
//! - [`network`] - destination converter stations and DC lines
//! - [`diagnostics`] - issue accumulation and the conversion report
//! - [`error`] - fatal per-configuration errors
//! - [`units`] - newtype unit wrappers (MW, Mvar, kV, ohm, percent)

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod network;
pub mod units;

pub use diagnostics::{ConversionReport, ConversionStats, DiagnosticIssue, Diagnostics, Severity};
pub use error::{HvdcError, HvdcResult};
pub use model::{
    AcDcConverterRecord, DcLineSegmentRecord, EquipmentKind, EquipmentSet, TransformerRecord,
};
pub use network::{
    ConverterStation, ConvertersMode, HvdcLine, HvdcNetwork, HvdcType, LccConverterStation,
    VscConverterStation,
};
pub use units::{Kilovolts, Megavars, Megawatts, Ohms, Percent};
