//! Post-conversion refresh of an existing HVDC line.
//!
//! After a state-variable import changes converter targets, the operating
//! mode, loss factors and power setpoints of an already-synthesized line can
//! be recomputed in place without re-running topology resolution.

use crate::loss_factor;
use crate::synthesize;
use hvdc_core::{
    AcDcConverterRecord, ConverterStation, Diagnostics, HvdcError, HvdcNetwork, HvdcResult,
    HvdcType,
};

/// Recompute the operating parameters of one line from fresh converter data.
///
/// `converter1` must be the record behind the line's side-1 station and
/// `converter2` the side-2 one; the caller keeps that association from the
/// original synthesis. Structural parameters (resistance, nominal voltage,
/// station pairing) are left untouched.
pub fn update_hvdc_line(
    network: &mut HvdcNetwork,
    line_id: &str,
    converter1: &AcDcConverterRecord,
    converter2: &AcDcConverterRecord,
    diag: &mut Diagnostics,
) -> HvdcResult<()> {
    let line = network
        .hvdc_line(line_id)
        .ok_or_else(|| HvdcError::UnknownHvdcLine(line_id.to_string()))?;
    let station_id1 = line.converter_station_id1.clone();
    let station_id2 = line.converter_station_id2.clone();
    let converter_type = match network
        .converter_station(&station_id1)
        .ok_or_else(|| HvdcError::UnknownConverterStation(station_id1.clone()))?
    {
        ConverterStation::Vsc(_) => HvdcType::Vsc,
        ConverterStation::Lcc(_) => HvdcType::Lcc,
    };

    let mode = synthesize::decode_mode(converter_type, converter1, converter2, diag);
    let factors = loss_factor::compute(
        mode,
        converter1.target_p_or_zero(),
        converter2.target_p_or_zero(),
        converter1.pole_loss_p,
        converter2.pole_loss_p,
        diag,
    );
    let (max_p, setpoint) = synthesize::operating_point(mode, converter1, converter2);

    let line = network
        .hvdc_line_mut(line_id)
        .ok_or_else(|| HvdcError::UnknownHvdcLine(line_id.to_string()))?;
    line.converters_mode = mode;
    line.max_p = max_p;
    line.active_power_setpoint = setpoint;

    update_station(network, &station_id1, converter1, factors.factor1, diag)?;
    update_station(network, &station_id2, converter2, factors.factor2, diag)?;
    Ok(())
}

fn update_station(
    network: &mut HvdcNetwork,
    station_id: &str,
    converter: &AcDcConverterRecord,
    loss_factor: hvdc_core::Percent,
    diag: &mut Diagnostics,
) -> HvdcResult<()> {
    let station = network
        .converter_station_mut(station_id)
        .ok_or_else(|| HvdcError::UnknownConverterStation(station_id.to_string()))?;
    match station {
        ConverterStation::Vsc(vsc) => {
            vsc.loss_factor = loss_factor;
            synthesize::apply_vsc_regulation(vsc, converter, diag);
        }
        ConverterStation::Lcc(lcc) => {
            lcc.loss_factor = loss_factor;
            lcc.power_factor = synthesize::lcc_power_factor(converter);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvdc_core::{ConvertersMode, HvdcLine, Kilovolts, Megawatts, Ohms, Percent};
    use hvdc_core::VscConverterStation;
    use hvdc_topology::test_util::converter;

    fn seed_network() -> HvdcNetwork {
        let mut network = HvdcNetwork::new();
        for id in ["C1", "C2"] {
            network.new_vsc_converter_station(VscConverterStation {
                id: id.into(),
                name: id.into(),
                loss_factor: Percent(0.0),
                voltage_regulator_on: false,
                voltage_setpoint: None,
                reactive_power_setpoint: None,
            });
        }
        network.new_hvdc_line(HvdcLine {
            id: "L1".into(),
            name: "L1".into(),
            r: Ohms(1.0),
            nominal_v: Kilovolts(400.0),
            active_power_setpoint: Megawatts(0.0),
            max_p: Megawatts(0.0),
            converters_mode: ConvertersMode::Side1RectifierSide2Inverter,
            converter_station_id1: "C1".into(),
            converter_station_id2: "C2".into(),
            aliases: Vec::new(),
        });
        network
    }

    #[test]
    fn test_update_recomputes_operating_parameters() {
        let mut network = seed_network();
        let mut diag = Diagnostics::new();

        let mut c1 = converter("C1", "A1", &["D1"]);
        c1.target_p = 100.0;
        c1.pole_loss_p = 2.0;
        let mut c2 = converter("C2", "A2", &["D2"]);
        c2.pole_loss_p = 3.0;

        update_hvdc_line(&mut network, "L1", &c1, &c2, &mut diag).unwrap();

        let line = network.hvdc_line("L1").unwrap();
        assert_eq!(line.converters_mode, ConvertersMode::Side1RectifierSide2Inverter);
        assert_eq!(line.active_power_setpoint, Megawatts(100.0));
        assert_eq!(line.max_p, Megawatts(120.0));
        assert_eq!(
            network.converter_station("C1").unwrap().loss_factor(),
            Percent(2.0)
        );
        // Structural parameters untouched
        assert_eq!(network.hvdc_line("L1").unwrap().r, Ohms(1.0));
    }

    #[test]
    fn test_update_reverses_mode_when_flow_flips() {
        let mut network = seed_network();
        let mut diag = Diagnostics::new();

        let mut c1 = converter("C1", "A1", &["D1"]);
        c1.target_p = -95.0;
        let c2 = converter("C2", "A2", &["D2"]);

        update_hvdc_line(&mut network, "L1", &c1, &c2, &mut diag).unwrap();
        assert_eq!(
            network.hvdc_line("L1").unwrap().converters_mode,
            ConvertersMode::Side1InverterSide2Rectifier
        );
    }

    #[test]
    fn test_unknown_line_is_an_error() {
        let mut network = seed_network();
        let mut diag = Diagnostics::new();
        let c1 = converter("C1", "A1", &["D1"]);
        let c2 = converter("C2", "A2", &["D2"]);

        let err = update_hvdc_line(&mut network, "L9", &c1, &c2, &mut diag).unwrap_err();
        assert!(matches!(err, HvdcError::UnknownHvdcLine(_)));
    }
}
