//! # Protection Stage
//!
//! Overcurrent protection for each winding: the line current plus a 25%
//! margin, rounded up to a whole ampere, and the next preferred breaker/fuse
//! size at or above that.

use serde::{Deserialize, Serialize};

use crate::calculations::winding::{WindingRole, WindingSpec};
use crate::equations::electrical::protection_rating_a;
use crate::observer::StageValue;

/// Preferred rated currents for fuses and miniature circuit breakers (A),
/// IEC 60269 / IEC 60898 R10-based series.
pub const STANDARD_RATINGS_A: [f64; 27] = [
    1.0, 2.0, 4.0, 6.0, 10.0, 13.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0,
    160.0, 200.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0,
];

/// Protection for one winding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionRating {
    pub role: WindingRole,
    /// Current the device sees (A)
    pub line_current_a: f64,
    /// ⌈1.25 × line current⌉ (A)
    pub rating_a: f64,
    /// Smallest preferred size ≥ `rating_a`; `None` above 1600 A
    pub standard_rating_a: Option<f64>,
}

/// Smallest preferred size that is not below `rating_a`
pub fn next_standard_rating(rating_a: f64) -> Option<f64> {
    STANDARD_RATINGS_A.iter().copied().find(|&size| size >= rating_a)
}

/// Rate protection for every winding, in winding order.
pub fn calculate(windings: &[WindingSpec]) -> Vec<ProtectionRating> {
    windings
        .iter()
        .map(|w| {
            let line_current_a = w.line_current_a();
            let rating_a = protection_rating_a(line_current_a);
            ProtectionRating {
                role: w.role,
                line_current_a,
                rating_a,
                standard_rating_a: next_standard_rating(rating_a),
            }
        })
        .collect()
}

pub(crate) fn stage_values(ratings: &[ProtectionRating]) -> Vec<StageValue> {
    let mut values = Vec::with_capacity(ratings.len() * 2);
    for r in ratings {
        let key = r.role.key();
        values.push(StageValue::new(format!("{}.rating_a", key), r.rating_a, "A"));
        if let Some(standard) = r.standard_rating_a {
            values.push(StageValue::new(format!("{}.standard_rating_a", key), standard, "A"));
        }
    }
    values
}
