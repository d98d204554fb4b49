//! Lookup tables compiled from `data/*.toml` by the build script.

pub mod wire_gauge_data {
    /// One row of the AWG table.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GaugeRow {
        pub awg: u8,
        pub diameter_mm: f64,
        pub area_mm2: f64,
    }

    include!(concat!(env!("OUT_DIR"), "/wire_gauge_data.rs"));

    /// Find the row for a gauge number.
    pub fn lookup(awg: u8) -> Option<&'static GaugeRow> {
        GAUGES.iter().find(|row| row.awg == awg)
    }
}

pub mod core_material_data {
    /// One core material preset.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct MaterialRow {
        pub code: &'static str,
        pub density_g_cm3: f64,
        pub loss_w_per_kg: f64,
        pub reference_flux_t: f64,
        pub reference_frequency_hz: f64,
        pub frequency_exponent: f64,
        pub flux_exponent: f64,
        pub saturation_flux_t: f64,
    }

    include!(concat!(env!("OUT_DIR"), "/core_material_data.rs"));

    /// Find a preset by its material code (e.g. "M19").
    pub fn lookup(code: &str) -> Option<&'static MaterialRow> {
        MATERIALS.iter().find(|row| row.code == code)
    }
}
