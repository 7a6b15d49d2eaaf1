//! Standalone HTML report for a stored evaluation.

pub mod radar;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::scoring::{contributions, splice_speed_mismatch, SeverityClass};
use crate::store::EvaluationRecord;
use crate::units::{fpm_to_mps, inches_to_mm, trim_float};

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Color for a severity class: 1-2 green, 3 amber, 4-5 red
fn class_color(class: SeverityClass) -> &'static str {
    match class.value() {
        1 | 2 => "#2e8b57",
        3 => "#e0a100",
        _ => "#d64541",
    }
}

fn render_breakdown_rows(record: &EvaluationRecord) -> String {
    contributions(&record.input)
        .iter()
        .map(|c| {
            format!(
                "        <tr><td>{}</td><td>{}</td><td class=\"num\">{} / {}</td></tr>",
                c.dimension.label(),
                escape_html(&c.description),
                c.score,
                c.dimension.max_score()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a stored evaluation as a self-contained HTML document.
pub fn render_html(record: &EvaluationRecord) -> String {
    let title = match record.conveyor {
        Some(ref conveyor) => format!("CEMA 576 Severity Report - {}", escape_html(conveyor)),
        None => format!("CEMA 576 Severity Report - Evaluation #{}", record.id),
    };
    let class = record.result.severity_class;
    let input = &record.input;

    let notes = record
        .notes
        .as_deref()
        .map(|n| format!("    <p class=\"notes\">{}</p>\n", escape_html(n)))
        .unwrap_or_default();
    let warning = splice_speed_mismatch(input.splice, input.speed_fpm)
        .map(|w| format!("    <p class=\"warning\">Note: {}</p>\n", escape_html(&w)))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 2rem; color: #222; }}
        table {{ border-collapse: collapse; margin: 1rem 0; }}
        td, th {{ border-bottom: 1px solid #ddd; padding: 0.4rem 0.8rem; text-align: left; }}
        td.num {{ text-align: right; }}
        .class {{ font-size: 2rem; font-weight: bold; color: {color}; }}
        .warning {{ color: #b36b00; }}
        .meta {{ color: #666; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="meta">Evaluation #{id}, recorded {recorded}</p>
{notes}    <p class="class">{class} (total {total} of 31)</p>
{warning}    <h2>Inputs</h2>
    <table>
        <tr><th>Belt width</th><td>{width_entered}</td><td>{width_in} in / {width_mm} mm</td></tr>
        <tr><th>Belt speed</th><td>{speed_entered}</td><td>{speed_fpm} fpm / {speed_mps} m/s</td></tr>
        <tr><th>Splice type</th><td colspan="2">{splice}</td></tr>
        <tr><th>Abrasiveness</th><td colspan="2">{abrasiveness}</td></tr>
        <tr><th>Moisture</th><td colspan="2">{moisture}</td></tr>
    </table>
    <h2>Score breakdown</h2>
    <table>
        <tr><th>Dimension</th><th>Basis</th><th>Score</th></tr>
{rows}
        <tr><th colspan="2">Total</th><td class="num">{total}</td></tr>
    </table>
    {radar}
</body>
</html>
"##,
        title = title,
        color = class_color(class),
        id = record.id,
        recorded = record.created_at.format("%Y-%m-%d %H:%M UTC"),
        notes = notes,
        class = class,
        total = record.result.total,
        warning = warning,
        width_entered = record.entered.width,
        width_in = trim_float(input.width_in),
        width_mm = trim_float(inches_to_mm(input.width_in)),
        speed_entered = record.entered.speed,
        speed_fpm = trim_float(input.speed_fpm),
        speed_mps = trim_float(fpm_to_mps(input.speed_fpm)),
        splice = input.splice,
        abrasiveness = input.abrasiveness,
        moisture = input.moisture,
        rows = render_breakdown_rows(record),
        radar = radar::render_radar_svg(&record.result.breakdown),
    )
}

/// Write a rendered report atomically, creating the parent directory.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save report at {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}
