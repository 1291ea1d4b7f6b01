//! Compile-time unit safety for HVDC quantities.
//!
//! Prevents mixing incompatible units like MW and Mvar, or kV and ohms.
//! All types use `#[repr(transparent)]` so they have the same memory layout
//! as `f64`; the compiler optimizes away the wrapper.
//!
//! # Usage
//!
//! ```
//! use hvdc_core::units::{Megawatts, Megavars};
//!
//! let p = Megawatts(100.0);
//! let total = p + Megawatts(20.0);
//!
//! // This would NOT compile - different units
//! // let wrong = p + Megavars(50.0);
//! assert_eq!(total.value(), 120.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Check if value is NaN
            #[inline]
            pub fn is_nan(self) -> bool {
                self.0.is_nan()
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }
    };
}

/// Active power in megawatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Megawatts(pub f64);
impl_unit_ops!(Megawatts, "MW");

/// Reactive power in megavars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Megavars(pub f64);
impl_unit_ops!(Megavars, "Mvar");

/// Voltage magnitude in kilovolts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Kilovolts(pub f64);
impl_unit_ops!(Kilovolts, "kV");

/// DC resistance in ohms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Ohms(pub f64);
impl_unit_ops!(Ohms, "ohm");

/// Dimensionless percentage (loss factors)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Percent(pub f64);
impl_unit_ops!(Percent, "%");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_arithmetic() {
        let p = Megawatts(100.0) + Megawatts(20.0);
        assert_eq!(p.value(), 120.0);
        assert_eq!((p - Megawatts(20.0)).value(), 100.0);
        assert_eq!((-Megawatts(5.0)).value(), -5.0);
        assert_eq!((Megawatts(50.0) * 1.2).value(), 60.0);
        assert_eq!((1.2 * Megawatts(50.0)).value(), 60.0);
        assert_eq!((Megawatts(100.0) / 4.0).value(), 25.0);
        assert_eq!(Megawatts(100.0) / Megawatts(50.0), 2.0);
    }

    #[test]
    fn test_abs_and_finiteness() {
        assert_eq!(Megawatts(-3.0).abs().value(), 3.0);
        assert!(Kilovolts(400.0).is_finite());
        assert!(Percent(f64::NAN).is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Ohms(1.0)), "1.0000 ohm");
        assert_eq!(format!("{}", Percent(3.0612)), "3.0612 %");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Megawatts(100.0)).unwrap();
        assert_eq!(json, "100.0");
        let back: Megawatts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Megawatts(100.0));
    }
}
