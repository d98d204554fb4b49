//! Magnet Wire Gauges (AWG)
//!
//! Static American Wire Gauge table for round copper conductors, gauges 0
//! through 40. Values are compiled from `data/wire_gauge.toml`.
//!
//! ## Selection Rule
//!
//! A winding never gets a conductor smaller than its current requires: the
//! selected gauge is the one with the smallest cross-section that is still
//! greater than or equal to the required cross-section. Currents beyond the
//! reach of gauge 0 are carried by several gauge-0 strands in parallel.
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::materials::wire_gauge::select_for_area;
//! use trafo_core::units::SqMm;
//!
//! // 30 A at 3.5 A/mm² needs 8.57 mm²; AWG 8 (8.37 mm²) is too small
//! let selection = select_for_area(SqMm(30.0 / 3.5));
//! assert_eq!(selection.gauge.awg, 7);
//! assert_eq!(selection.strands, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::generated::wire_gauge_data::{self, GaugeRow, GAUGES};
use crate::units::SqMm;

/// Diameter growth from grade 2 enamel insulation
pub const ENAMEL_BUILD_FACTOR: f64 = 1.10;

/// One entry of the wire gauge table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireGauge {
    /// AWG number (0 = thickest)
    pub awg: u8,
    /// Bare conductor diameter (mm)
    pub diameter_mm: f64,
    /// Bare conductor cross-section (mm²)
    pub area_mm2: f64,
}

impl From<&GaugeRow> for WireGauge {
    fn from(row: &GaugeRow) -> Self {
        WireGauge {
            awg: row.awg,
            diameter_mm: row.diameter_mm,
            area_mm2: row.area_mm2,
        }
    }
}

impl WireGauge {
    /// Look up a gauge by AWG number
    pub fn lookup(awg: u8) -> Option<Self> {
        wire_gauge_data::lookup(awg).map(WireGauge::from)
    }

    /// Every gauge in the table, thickest first
    pub fn all() -> impl Iterator<Item = WireGauge> {
        GAUGES.iter().map(WireGauge::from)
    }

    /// The thickest conductor in the table (gauge 0)
    pub fn largest() -> Self {
        // Table is ordered by gauge, gauge 0 first.
        WireGauge::from(&GAUGES[0])
    }

    /// Bare cross-section as a typed unit
    pub fn area(&self) -> SqMm {
        SqMm(self.area_mm2)
    }

    /// Outside diameter including enamel (mm)
    pub fn insulated_diameter_mm(&self) -> f64 {
        self.diameter_mm * ENAMEL_BUILD_FACTOR
    }

    /// Display label, e.g. "AWG 10"
    pub fn display_name(&self) -> String {
        format!("AWG {}", self.awg)
    }
}

impl std::fmt::Display for WireGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A conductor choice: one gauge, possibly several strands in hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireSelection {
    pub gauge: WireGauge,
    /// Parallel strands wound together (1 for all but the heaviest currents)
    pub strands: u32,
}

impl WireSelection {
    /// Combined copper cross-section of all strands (mm²)
    pub fn total_area_mm2(&self) -> f64 {
        self.gauge.area_mm2 * f64::from(self.strands)
    }
}

/// Select the smallest conductor whose cross-section is at least `required`.
///
/// Never rounds down. When even gauge 0 is too small, returns the minimum
/// number of parallel gauge-0 strands that covers the requirement.
pub fn select_for_area(required: SqMm) -> WireSelection {
    // Walk from the thinnest gauge towards the thickest.
    if let Some(row) = GAUGES.iter().rev().find(|row| row.area_mm2 >= required.0) {
        return WireSelection {
            gauge: WireGauge::from(row),
            strands: 1,
        };
    }

    let largest = WireGauge::largest();
    let strands = (required.0 / largest.area_mm2).ceil().max(1.0) as u32;
    WireSelection {
        gauge: largest,
        strands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_gauge_0_to_40() {
        assert_eq!(WireGauge::largest().awg, 0);
        for awg in 0..=40 {
            assert!(WireGauge::lookup(awg).is_some(), "missing AWG {}", awg);
        }
        assert!(WireGauge::lookup(41).is_none());
    }

    #[test]
    fn test_table_is_monotonic() {
        let gauges: Vec<WireGauge> = WireGauge::all().collect();
        for pair in gauges.windows(2) {
            assert!(pair[0].awg < pair[1].awg);
            assert!(pair[0].area_mm2 > pair[1].area_mm2);
            assert!(pair[0].diameter_mm > pair[1].diameter_mm);
        }
    }

    #[test]
    fn test_known_values() {
        let awg10 = WireGauge::lookup(10).unwrap();
        assert!((awg10.diameter_mm - 2.588).abs() < 0.001);
        assert!((awg10.area_mm2 - 5.261).abs() < 0.001);
    }

    #[test]
    fn test_selection_never_undersized() {
        for i in 1..400 {
            let required = SqMm(i as f64 * 0.137);
            let selection = select_for_area(required);
            assert!(
                selection.total_area_mm2() >= required.0,
                "{} mm² selected for {} mm²",
                selection.total_area_mm2(),
                required.0
            );
        }
    }

    #[test]
    fn test_selection_is_smallest_sufficient() {
        let selection = select_for_area(SqMm(4.511));
        assert_eq!(selection.gauge.awg, 10);
        // the next thinner gauge would be undersized
        let thinner = WireGauge::lookup(11).unwrap();
        assert!(thinner.area_mm2 < 4.511);
    }

    #[test]
    fn test_exact_table_area_selects_that_gauge() {
        let awg14 = WireGauge::lookup(14).unwrap();
        assert_eq!(select_for_area(awg14.area()).gauge.awg, 14);
    }

    #[test]
    fn test_parallel_strands_beyond_gauge_0() {
        let selection = select_for_area(SqMm(120.0));
        assert_eq!(selection.gauge.awg, 0);
        assert_eq!(selection.strands, 3);
        assert!(selection.total_area_mm2() >= 120.0);
    }

    #[test]
    fn test_insulated_diameter() {
        let awg20 = WireGauge::lookup(20).unwrap();
        assert!(awg20.insulated_diameter_mm() > awg20.diameter_mm);
        assert_eq!(awg20.to_string(), "AWG 20");
    }
}
