//! # Design Report
//!
//! Arranges a [`DesignResult`] into an ordered, human-readable document and
//! renders it as plain text or markdown. Nothing here computes engineering
//! values; it only chooses units and decimal places.
//!
//! ## Section Order
//!
//! Power summary, core, windings, window fill, protection, losses and
//! efficiency, thermal, regulation, construction, notes. An equations appendix
//! can be appended with [`DesignReport::with_equations`].
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::calculations::{calculate, DesignInput};
//! use trafo_core::report::{DesignReport, ReportHeader};
//!
//! # let json = r#"{"label":"T-1","phase":"single-phase","input_voltage_v":230.0,
//! #   "frequency_hz":50.0,"secondaries":[{"voltage_v":12.0,"current_a":4.0}],
//! #   "flux_density_t":1.4,"current_density_a_mm2":3.0,"core_shape":"E-I",
//! #   "core_material":"M27","efficiency":0.9,"fill_factor":0.4,"ambient_temp_c":25.0}"#;
//! let input = DesignInput::from_json(json).unwrap();
//! let result = calculate(&input).unwrap();
//!
//! let header = ReportHeader::new("J. Engineer", "25-001", "Acme Controls");
//! let report = DesignReport::assemble(&result, Some(header));
//! assert!(report.to_markdown().starts_with("# Transformer Design: T-1"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::design::DesignResult;
use crate::equations::registry::Equation;

/// Who prepared the report, for whom, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    /// Responsible engineer
    pub engineer: String,
    /// Job/project number (e.g., "25-001")
    pub job_id: String,
    /// Client name
    pub client: String,
    /// When the report was prepared
    pub prepared: DateTime<Utc>,
}

impl ReportHeader {
    /// Header stamped with the current time.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        ReportHeader {
            engineer: engineer.into(),
            job_id: job_id.into(),
            client: client.into(),
            prepared: Utc::now(),
        }
    }
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportField {
    pub label: String,
    pub value: String,
}

/// Content of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SectionBody {
    /// Label/value pairs
    Fields { fields: Vec<ReportField> },
    /// A table, one row per winding
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Free-form lines
    Lines { lines: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub body: SectionBody,
}

/// Structured report for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub title: String,
    pub header: Option<ReportHeader>,
    /// Overall verdict: window fill and temperature both acceptable
    pub passes: bool,
    pub sections: Vec<ReportSection>,
}

fn field(label: &str, value: String) -> ReportField {
    ReportField {
        label: label.to_string(),
        value,
    }
}

fn fields(title: &str, fields: Vec<ReportField>) -> ReportSection {
    ReportSection {
        title: title.to_string(),
        body: SectionBody::Fields { fields },
    }
}

fn table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> ReportSection {
    ReportSection {
        title: title.to_string(),
        body: SectionBody::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        },
    }
}

impl DesignReport {
    /// Arrange a design result into report sections.
    pub fn assemble(result: &DesignResult, header: Option<ReportHeader>) -> Self {
        let input = &result.input;
        let title = if input.label.is_empty() {
            "Transformer Design".to_string()
        } else {
            format!("Transformer Design: {}", input.label)
        };

        let mut sections = Vec::with_capacity(10);

        // === Power ===
        let p = &result.power;
        let mut power_fields = vec![
            field("Supply", format!("{} {:.1} V, {:.1} Hz", input.phase, input.input_voltage_v, input.frequency_hz)),
        ];
        for (i, (secondary, va)) in input.secondaries.iter().zip(&p.secondary_va).enumerate() {
            power_fields.push(field(
                &format!("Secondary {}", i + 1),
                format!("{:.1} V x {:.2} A = {:.1} VA", secondary.voltage_v, secondary.current_a, va),
            ));
        }
        power_fields.extend([
            field("Output power", format!("{:.1} VA", p.output_va)),
            field("Target efficiency", format!("{:.1} %", input.efficiency * 100.0)),
            field("Input power", format!("{:.1} VA", p.input_va)),
            field("Loss budget", format!("{:.1} W", p.loss_budget_w)),
            field("Primary line current", format!("{:.2} A", p.primary_current_a)),
        ]);
        sections.push(fields("Power Summary", power_fields));

        // === Core ===
        let g = &result.geometry;
        sections.push(fields(
            "Core",
            vec![
                field("Shape", g.shape.display_name().to_string()),
                field("Material", input.core_material.display_name().to_string()),
                field("Flux density", format!("{:.2} T", input.flux_density_t)),
                field("Area product Ap", format!("{:.1} cm⁴", g.area_product_cm4)),
                field("Core area Ae", format!("{:.2} cm²", g.core_area_cm2)),
                field("Window area Aw", format!("{:.2} cm²", g.window_area_cm2)),
                field("Leg width / stack", format!("{:.2} cm", g.core_width_cm)),
                field(
                    "Window (h x w)",
                    format!("{:.2} x {:.2} cm", g.window_height_cm, g.window_width_cm),
                ),
                field("Magnetic path", format!("{:.2} cm", g.path_length_cm)),
                field("Core volume", format!("{:.1} cm³", g.volume_cm3)),
                field("Core mass", format!("{:.2} kg", g.mass_kg)),
                field("Turns per volt", format!("{:.4}", result.turns_per_volt)),
            ],
        ));

        // === Windings ===
        let winding_rows = result
            .windings
            .iter()
            .map(|w| {
                let conductor = if w.wire.strands > 1 {
                    format!("{} x {}", w.wire.strands, w.wire.gauge)
                } else {
                    w.wire.gauge.to_string()
                };
                let turns = if w.sub_windings > 1 {
                    format!("{} x {}", w.sub_windings, w.turns)
                } else {
                    w.turns.to_string()
                };
                vec![
                    w.role.to_string(),
                    format!("{:.1}", w.voltage_v),
                    format!("{:.2}", w.current_a),
                    turns,
                    conductor,
                    format!("{:.3}", w.wire.gauge.diameter_mm),
                    format!("{:.2}", w.length_m),
                    format!("{:.4}", w.resistance_20c_ohm),
                ]
            })
            .collect();
        sections.push(table(
            "Windings",
            &["Winding", "V", "A", "Turns", "Wire", "Ø mm", "Length m", "R20 Ω"],
            winding_rows,
        ));

        // === Window fill ===
        let fill = &result.window_fill;
        sections.push(fields(
            "Window Fill",
            vec![
                field("Copper area", format!("{:.1} mm²", fill.copper_area_mm2)),
                field("Window area", format!("{:.1} mm²", fill.window_area_mm2)),
                field("Fill", format!("{:.1} % (target {:.0} %)", fill.fill_percent, fill.target_percent)),
                field("Verdict", fill.verdict.to_string()),
            ],
        ));

        // === Protection ===
        let protection_rows = result
            .protection
            .iter()
            .map(|r| {
                vec![
                    r.role.to_string(),
                    format!("{:.2}", r.line_current_a),
                    format!("{:.0}", r.rating_a),
                    r.standard_rating_a
                        .map(|s| format!("{:.0}", s))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        sections.push(table(
            "Protection",
            &["Winding", "Line A", "Rating A", "Standard A"],
            protection_rows,
        ));

        // === Losses ===
        let t = &result.thermal;
        let mut loss_fields: Vec<ReportField> = t
            .winding_losses
            .iter()
            .map(|l| {
                field(
                    &format!("{} copper loss", l.role),
                    format!("{:.2} W (R hot {:.4} Ω)", l.copper_loss_w, l.corrected_resistance_ohm),
                )
            })
            .collect();
        loss_fields.extend([
            field("Total copper loss", format!("{:.2} W", t.copper_loss_w)),
            field("Core loss", format!("{:.2} W", t.core_loss_w)),
            field("Total loss", format!("{:.2} W", t.total_loss_w)),
            field("Efficiency", format!("{:.2} %", t.efficiency_percent)),
        ]);
        sections.push(fields("Losses and Efficiency", loss_fields));

        // === Thermal ===
        let rise = if t.rise_capped {
            format!("{:.1} °C (capped)", t.temperature_rise_c)
        } else {
            format!("{:.1} °C", t.temperature_rise_c)
        };
        sections.push(fields(
            "Thermal",
            vec![
                field("Ambient", format!("{:.1} °C", input.ambient_temp_c)),
                field("Radiating surface", format!("{:.1} cm²", t.radiating_surface_cm2)),
                field("Temperature rise", rise),
                field("Operating temperature", format!("{:.1} °C", t.operating_temp_c)),
                field("Ventilation", t.ventilation.to_string()),
                field("Insulation", t.insulation.to_string()),
                field("Verdict", t.verdict.to_string()),
            ],
        ));

        // === Regulation ===
        sections.push(fields(
            "Regulation",
            result
                .regulation
                .iter()
                .map(|r| field(&r.role.to_string(), format!("{:.2} %", r.regulation_percent)))
                .collect(),
        ));

        // === Construction ===
        let c = &result.construction;
        let mut construction_fields = vec![
            field("Insulation class", c.insulation_class.to_string()),
            field("Interlayer insulation", c.interlayer_insulation.to_string()),
        ];
        construction_fields.extend(c.windings.iter().map(|w| {
            field(
                &format!("{} layers", w.role),
                format!("{} ({} turns/layer)", w.layers, w.turns_per_layer),
            )
        }));
        sections.push(fields("Construction", construction_fields));

        // === Notes ===
        let lines = if result.notes.is_empty() {
            vec!["None".to_string()]
        } else {
            result.notes.clone()
        };
        sections.push(ReportSection {
            title: "Notes".to_string(),
            body: SectionBody::Lines { lines },
        });

        DesignReport {
            title,
            header,
            passes: result.passes(),
            sections,
        }
    }

    /// Append the formulas used, with references.
    pub fn with_equations(mut self) -> Self {
        let lines = Equation::ALL
            .iter()
            .map(|eq| {
                let meta = eq.metadata();
                format!("{}: {} [{}]", meta.name, meta.formula_plain, meta.reference.citation())
            })
            .collect();
        self.sections.push(ReportSection {
            title: "Appendix: Equations".to_string(),
            body: SectionBody::Lines { lines },
        });
        self
    }

    /// Find a section by title
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    fn verdict_text(&self) -> &'static str {
        if self.passes {
            "PASS"
        } else {
            "REVIEW"
        }
    }

    /// Render as plain text for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title));
        out.push_str(&format!("{}\n", "=".repeat(self.title.chars().count())));
        if let Some(h) = &self.header {
            out.push_str(&format!("Engineer: {}\n", h.engineer));
            out.push_str(&format!("Job:      {}\n", h.job_id));
            out.push_str(&format!("Client:   {}\n", h.client));
            out.push_str(&format!("Prepared: {}\n", h.prepared.format("%Y-%m-%d %H:%M UTC")));
        }
        out.push_str(&format!("Verdict:  {}\n", self.verdict_text()));

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!("{}\n", section.title));
            out.push_str(&format!("{}\n", "-".repeat(section.title.chars().count())));
            match &section.body {
                SectionBody::Fields { fields } => {
                    for f in fields {
                        out.push_str(&format!("  {:<28} {}\n", f.label, f.value));
                    }
                }
                SectionBody::Table { headers, rows } => {
                    let widths = column_widths(headers, rows);
                    out.push_str(&format!("  {}\n", pad_row(headers, &widths)));
                    for row in rows {
                        out.push_str(&format!("  {}\n", pad_row(row, &widths)));
                    }
                }
                SectionBody::Lines { lines } => {
                    for line in lines {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
            }
        }
        out
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        if let Some(h) = &self.header {
            out.push_str(&format!("- **Engineer:** {}\n", h.engineer));
            out.push_str(&format!("- **Job:** {}\n", h.job_id));
            out.push_str(&format!("- **Client:** {}\n", h.client));
            out.push_str(&format!("- **Prepared:** {}\n", h.prepared.format("%Y-%m-%d")));
        }
        out.push_str(&format!("- **Verdict:** {}\n", self.verdict_text()));

        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.title));
            match &section.body {
                SectionBody::Fields { fields } => {
                    out.push_str("| Quantity | Value |\n|---|---|\n");
                    for f in fields {
                        out.push_str(&format!("| {} | {} |\n", f.label, f.value));
                    }
                }
                SectionBody::Table { headers, rows } => {
                    out.push_str(&format!("| {} |\n", headers.join(" | ")));
                    out.push_str(&format!("|{}\n", "---|".repeat(headers.len())));
                    for row in rows {
                        out.push_str(&format!("| {} |\n", row.join(" | ")));
                    }
                }
                SectionBody::Lines { lines } => {
                    for line in lines {
                        out.push_str(&format!("- {}\n", line));
                    }
                }
            }
        }
        out
    }
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
