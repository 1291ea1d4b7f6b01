//! Destination network model for synthesized HVDC equipment.
//!
//! The resolver emits converter stations and DC lines into an
//! [`HvdcNetwork`]. The model is deliberately small: it carries exactly the
//! electrical parameters the synthesis stage computes, and it is mutable in
//! place so the post-conversion refresh pass can re-apply operating mode,
//! setpoints and loss factors without rebuilding anything.

use crate::units::{Kilovolts, Megavars, Megawatts, Ohms, Percent};
use serde::Serialize;
use std::collections::HashMap;

/// Voltage-source vs line-commutated converter technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HvdcType {
    Vsc,
    Lcc,
}

/// Which side of the line rectifies under the current operating point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConvertersMode {
    Side1RectifierSide2Inverter,
    Side1InverterSide2Rectifier,
}

/// A voltage-source converter station
#[derive(Debug, Clone, Serialize)]
pub struct VscConverterStation {
    pub id: String,
    pub name: String,
    pub loss_factor: Percent,
    pub voltage_regulator_on: bool,
    /// Voltage setpoint at the point of common coupling, when regulating voltage
    pub voltage_setpoint: Option<Kilovolts>,
    /// Reactive power setpoint, when regulating reactive power
    pub reactive_power_setpoint: Option<Megavars>,
}

/// A line-commutated converter station
#[derive(Debug, Clone, Serialize)]
pub struct LccConverterStation {
    pub id: String,
    pub name: String,
    pub loss_factor: Percent,
    /// Ratio of active power to apparent power at the AC terminal
    pub power_factor: f64,
}

/// Either converter station technology
#[derive(Debug, Clone, Serialize)]
pub enum ConverterStation {
    Vsc(VscConverterStation),
    Lcc(LccConverterStation),
}

impl ConverterStation {
    pub fn id(&self) -> &str {
        match self {
            ConverterStation::Vsc(s) => &s.id,
            ConverterStation::Lcc(s) => &s.id,
        }
    }

    pub fn loss_factor(&self) -> Percent {
        match self {
            ConverterStation::Vsc(s) => s.loss_factor,
            ConverterStation::Lcc(s) => s.loss_factor,
        }
    }

    pub fn set_loss_factor(&mut self, loss_factor: Percent) {
        match self {
            ConverterStation::Vsc(s) => s.loss_factor = loss_factor,
            ConverterStation::Lcc(s) => s.loss_factor = loss_factor,
        }
    }
}

/// A DC line connecting two converter stations
#[derive(Debug, Clone, Serialize)]
pub struct HvdcLine {
    pub id: String,
    pub name: String,
    pub r: Ohms,
    pub nominal_v: Kilovolts,
    pub active_power_setpoint: Megawatts,
    pub max_p: Megawatts,
    pub converters_mode: ConvertersMode,
    pub converter_station_id1: String,
    pub converter_station_id2: String,
    /// Extra source ids mapped onto this line (e.g. a second parallel segment)
    pub aliases: Vec<(String, String)>,
}

impl HvdcLine {
    /// Record an extra source id for this line under an alias type
    pub fn add_alias(&mut self, id: impl Into<String>, alias_type: impl Into<String>) {
        self.aliases.push((id.into(), alias_type.into()));
    }
}

/// Container for all synthesized HVDC equipment of one network
#[derive(Debug, Clone, Default, Serialize)]
pub struct HvdcNetwork {
    stations: Vec<ConverterStation>,
    lines: Vec<HvdcLine>,
    #[serde(skip)]
    station_index: HashMap<String, usize>,
    #[serde(skip)]
    line_index: HashMap<String, usize>,
}

impl HvdcNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a VSC converter station, returning its id
    pub fn new_vsc_converter_station(&mut self, station: VscConverterStation) -> String {
        let id = station.id.clone();
        self.station_index.insert(id.clone(), self.stations.len());
        self.stations.push(ConverterStation::Vsc(station));
        id
    }

    /// Add an LCC converter station, returning its id
    pub fn new_lcc_converter_station(&mut self, station: LccConverterStation) -> String {
        let id = station.id.clone();
        self.station_index.insert(id.clone(), self.stations.len());
        self.stations.push(ConverterStation::Lcc(station));
        id
    }

    /// Add an HVDC line, returning its id
    pub fn new_hvdc_line(&mut self, line: HvdcLine) -> String {
        let id = line.id.clone();
        self.line_index.insert(id.clone(), self.lines.len());
        self.lines.push(line);
        id
    }

    pub fn converter_station(&self, id: &str) -> Option<&ConverterStation> {
        self.station_index.get(id).map(|&i| &self.stations[i])
    }

    pub fn converter_station_mut(&mut self, id: &str) -> Option<&mut ConverterStation> {
        self.station_index
            .get(id)
            .map(|&i| &mut self.stations[i])
    }

    pub fn hvdc_line(&self, id: &str) -> Option<&HvdcLine> {
        self.line_index.get(id).map(|&i| &self.lines[i])
    }

    pub fn hvdc_line_mut(&mut self, id: &str) -> Option<&mut HvdcLine> {
        self.line_index.get(id).map(|&i| &mut self.lines[i])
    }

    /// All HVDC lines in creation order
    pub fn hvdc_lines(&self) -> &[HvdcLine] {
        &self.lines
    }

    /// All converter stations in creation order
    pub fn converter_stations(&self) -> &[ConverterStation] {
        &self.stations
    }
}
