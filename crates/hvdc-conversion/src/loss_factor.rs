//! Converter loss-factor computation.
//!
//! `poleLossP` is the active power loss at a DC pole. For lossless operation
//! `P(DC) = P(AC)` and the loss factor is 0. For rectifier operation
//! (AC to DC) `P(DC) = P(AC) - poleLossP`, so
//! `lossFactor = poleLossP / P(AC) * 100`. For inverter operation (DC to AC)
//! `P(DC) = P(AC) + poleLossP`, so `lossFactor = poleLossP / P(DC) * 100`.
//!
//! The load sign convention applies: a rectifier's target AC power is
//! non-negative, an inverter's non-positive. Only the side consistent with
//! the operating mode is trusted when both targets are present; the other
//! side's factor is derived from the DC-link power instead of its own,
//! possibly inconsistent, target.

use hvdc_core::{ConvertersMode, Diagnostics, Percent};

/// Loss factors for the two converters of one link, in percent, always finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossFactors {
    pub factor1: Percent,
    pub factor2: Percent,
}

/// Compute both converters' loss factors for one operating point.
///
/// Case split on which targets are non-zero; when neither side has a target
/// the stations are presumed disconnected and both factors are 0. Any
/// non-finite intermediate result is replaced by 0 with a `fixed` diagnostic
/// naming the factor.
pub fn compute(
    mode: ConvertersMode,
    p_ac1: f64,
    p_ac2: f64,
    pole_loss1: f64,
    pole_loss2: f64,
    diag: &mut Diagnostics,
) -> LossFactors {
    let (p_rect, p_inv, loss_rect, loss_inv) = match mode {
        ConvertersMode::Side1RectifierSide2Inverter => (p_ac1, p_ac2, pole_loss1, pole_loss2),
        ConvertersMode::Side1InverterSide2Rectifier => (p_ac2, p_ac1, pole_loss2, pole_loss1),
    };

    let (factor_rect, factor_inv) = if p_rect != 0.0 {
        // Rectifier target is trusted; DC-link power derives the inverter side
        let p_ac = p_rect.abs();
        let p_dc = p_ac - loss_rect;
        (loss_rect / p_ac * 100.0, loss_inv / p_dc * 100.0)
    } else if p_inv != 0.0 {
        // Only the inverter target is known; its DC-side power includes the
        // pole loss added going inverter to AC
        let p_dc = p_inv.abs() + loss_inv;
        let p_ac_rect = p_dc + loss_rect;
        (loss_rect / p_ac_rect * 100.0, loss_inv / p_dc * 100.0)
    } else {
        (0.0, 0.0)
    };

    let (factor1, factor2) = match mode {
        ConvertersMode::Side1RectifierSide2Inverter => (factor_rect, factor_inv),
        ConvertersMode::Side1InverterSide2Rectifier => (factor_inv, factor_rect),
    };

    LossFactors {
        factor1: normalized(factor1, "lossFactor1", diag),
        factor2: normalized(factor2, "lossFactor2", diag),
    }
}

fn normalized(factor: f64, name: &str, diag: &mut Diagnostics) -> Percent {
    if factor.is_finite() {
        Percent(factor)
    } else {
        diag.add_fixed(name, "was not finite", factor, 0.0);
        Percent(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvdc_core::ConvertersMode::{Side1InverterSide2Rectifier, Side1RectifierSide2Inverter};

    #[test]
    fn test_rectifier_side_known() {
        let mut diag = Diagnostics::new();
        let factors = compute(Side1RectifierSide2Inverter, 100.0, 0.0, 2.0, 3.0, &mut diag);
        assert!((factors.factor1.value() - 2.0).abs() < 1e-9);
        // DC power = 98; factor2 = 3 / 98 * 100
        assert!((factors.factor2.value() - 3.061_224_489_795_918).abs() < 1e-9);
        assert!(!diag.has_issues());
    }

    #[test]
    fn test_both_sides_known_trusts_rectifier() {
        let mut diag = Diagnostics::new();
        // Inverter target (-97) is deliberately inconsistent and must not be used
        let factors = compute(
            Side1RectifierSide2Inverter,
            100.0,
            -97.0,
            2.0,
            3.0,
            &mut diag,
        );
        assert!((factors.factor1.value() - 2.0).abs() < 1e-9);
        assert!((factors.factor2.value() - 3.061_224_489_795_918).abs() < 1e-9);
    }

    #[test]
    fn test_inverter_side_known() {
        let mut diag = Diagnostics::new();
        let factors = compute(Side1RectifierSide2Inverter, 0.0, -95.0, 2.0, 3.0, &mut diag);
        // Inverter DC power = 95 + 3 = 98; factor2 = 3 / 98 * 100
        assert!((factors.factor2.value() - 3.061_224_489_795_918).abs() < 1e-9);
        // Rectifier AC power = 98 + 2 = 100; factor1 = 2 / 100 * 100
        assert!((factors.factor1.value() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_mode_swaps_sides() {
        let mut diag = Diagnostics::new();
        let factors = compute(Side1InverterSide2Rectifier, 0.0, 100.0, 3.0, 2.0, &mut diag);
        assert!((factors.factor2.value() - 2.0).abs() < 1e-9);
        assert!((factors.factor1.value() - 3.061_224_489_795_918).abs() < 1e-9);
    }

    #[test]
    fn test_disconnected_stations() {
        let mut diag = Diagnostics::new();
        let factors = compute(Side1RectifierSide2Inverter, 0.0, 0.0, 2.0, 3.0, &mut diag);
        assert_eq!(factors.factor1, Percent(0.0));
        assert_eq!(factors.factor2, Percent(0.0));
    }

    #[test]
    fn test_non_finite_factor_fixed_to_zero() {
        let mut diag = Diagnostics::new();
        // Pole loss equals the rectifier power, so DC power is 0 and the
        // inverter factor divides by zero
        let factors = compute(Side1RectifierSide2Inverter, 2.0, 0.0, 2.0, 3.0, &mut diag);
        assert_eq!(factors.factor2, Percent(0.0));
        let issue = diag.fixed().next().unwrap();
        assert!(issue.message.contains("lossFactor2"));
    }
}
