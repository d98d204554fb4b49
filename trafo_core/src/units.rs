//! # Unit Types
//!
//! Type-safe wrappers for the length and area units the design pipeline
//! mixes. These provide compile-time safety against unit confusion while
//! remaining lightweight (just f64 wrappers).
//!
//! ## Why Areas Get Their Own Types
//!
//! The pipeline reads core areas in cm², wire areas in mm², and needs m² for
//! Faraday's law and resistivity. A missed cm² -> m² conversion inflates the
//! turns count by 10,000x, so every crossing goes through a `From` impl:
//!
//! - 1 cm² = 100 mm²
//! - 1 cm² = 1e-4 m²
//! - 1 mm² = 1e-6 m²
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::units::{SqCm, SqM, SqMm};
//!
//! let ae = SqCm(47.0);
//! let ae_m2: SqM = ae.into();
//! assert!((ae_m2.0 - 0.0047).abs() < 1e-12);
//!
//! let window: SqMm = SqCm(70.0).into();
//! assert_eq!(window.0, 7000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Cm> for Mm {
    fn from(cm: Cm) -> Self {
        Mm(cm.0 * 10.0)
    }
}

impl From<Mm> for Cm {
    fn from(mm: Mm) -> Self {
        Cm(mm.0 / 10.0)
    }
}

impl From<Cm> for Meters {
    fn from(cm: Cm) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Cm {
    fn from(m: Meters) -> Self {
        Cm(m.0 * 100.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters (wire cross-sections)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square centimeters (core and window areas)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqCm(pub f64);

/// Area in square meters (SI, for Faraday's law and resistivity)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqCm> for SqMm {
    fn from(cm2: SqCm) -> Self {
        SqMm(cm2.0 * 100.0)
    }
}

impl From<SqMm> for SqCm {
    fn from(mm2: SqMm) -> Self {
        SqCm(mm2.0 / 100.0)
    }
}

impl From<SqCm> for SqM {
    fn from(cm2: SqCm) -> Self {
        SqM(cm2.0 * 1e-4)
    }
}

impl From<SqMm> for SqM {
    fn from(mm2: SqMm) -> Self {
        SqM(mm2.0 * 1e-6)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
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

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Mm);
impl_arithmetic!(Cm);
impl_arithmetic!(Meters);
impl_arithmetic!(SqMm);
impl_arithmetic!(SqCm);
impl_arithmetic!(SqM);
