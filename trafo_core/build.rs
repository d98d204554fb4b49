//! Compiles the TOML tables under `data/` into Rust constants.
//!
//! The generated files land in `OUT_DIR` and are pulled in by
//! `src/generated.rs`. Nothing is read from disk at run time.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Deserialize)]
struct WireGaugeFile {
    gauge: Vec<GaugeRow>,
}

#[derive(Deserialize)]
struct GaugeRow {
    awg: u8,
    diameter_mm: f64,
    area_mm2: f64,
}

#[derive(Deserialize)]
struct CoreMaterialFile {
    material: Vec<MaterialRow>,
}

#[derive(Deserialize)]
struct MaterialRow {
    code: String,
    density_g_cm3: f64,
    loss_w_per_kg: f64,
    reference_flux_t: f64,
    reference_frequency_hz: f64,
    frequency_exponent: f64,
    flux_exponent: f64,
    saturation_flux_t: f64,
}

fn main() {
    println!("cargo:rerun-if-changed=data/wire_gauge.toml");
    println!("cargo:rerun-if-changed=data/core_materials.toml");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");

    let wire_src = fs::read_to_string("data/wire_gauge.toml").expect("read data/wire_gauge.toml");
    let wire: WireGaugeFile = toml::from_str(&wire_src).expect("parse data/wire_gauge.toml");
    fs::write(Path::new(&out_dir).join("wire_gauge_data.rs"), render_wire_gauges(&wire))
        .expect("write wire_gauge_data.rs");

    let mat_src =
        fs::read_to_string("data/core_materials.toml").expect("read data/core_materials.toml");
    let materials: CoreMaterialFile =
        toml::from_str(&mat_src).expect("parse data/core_materials.toml");
    fs::write(
        Path::new(&out_dir).join("core_material_data.rs"),
        render_materials(&materials),
    )
    .expect("write core_material_data.rs");
}

fn render_wire_gauges(file: &WireGaugeFile) -> String {
    let mut out = String::new();
    out.push_str("/// Generated from data/wire_gauge.toml, ordered by gauge.\n");
    out.push_str("pub const GAUGES: &[GaugeRow] = &[\n");
    for row in &file.gauge {
        let _ = writeln!(
            out,
            "    GaugeRow {{ awg: {}, diameter_mm: {:?}, area_mm2: {:?} }},",
            row.awg, row.diameter_mm, row.area_mm2
        );
    }
    out.push_str("];\n");
    out
}

fn render_materials(file: &CoreMaterialFile) -> String {
    let mut out = String::new();
    out.push_str("/// Generated from data/core_materials.toml.\n");
    out.push_str("pub const MATERIALS: &[MaterialRow] = &[\n");
    for row in &file.material {
        let _ = writeln!(
            out,
            "    MaterialRow {{ code: {:?}, density_g_cm3: {:?}, loss_w_per_kg: {:?}, \
             reference_flux_t: {:?}, reference_frequency_hz: {:?}, frequency_exponent: {:?}, \
             flux_exponent: {:?}, saturation_flux_t: {:?} }},",
            row.code,
            row.density_g_cm3,
            row.loss_w_per_kg,
            row.reference_flux_t,
            row.reference_frequency_hz,
            row.frequency_exponent,
            row.flux_exponent,
            row.saturation_flux_t
        );
    }
    out.push_str("];\n");
    out
}
