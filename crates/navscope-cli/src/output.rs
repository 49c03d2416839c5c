pub mod chart;

use std::io::{self, Write};

use navscope_core::{Envelope, NavPoint, SchemeDetail};
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::commands::CommandOutcome;
use crate::error::CliError;

const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 12;

pub fn render(outcome: &CommandOutcome, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, outcome, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn render_to(
    out: &mut impl Write,
    outcome: &CommandOutcome,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&outcome.envelope)?
            } else {
                serde_json::to_string(&outcome.envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            render_table(out, &outcome.envelope)?;
            if let Some(nav_chart) = &outcome.chart {
                writeln!(out)?;
                for line in chart::draw(nav_chart, CHART_WIDTH, CHART_HEIGHT) {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

fn render_table(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "provider    : {}", envelope.meta.provider)?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if let Value::Object(data) = &envelope.data {
        render_sections(out, data, envelope.has_errors())?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

/// Draws the sections every command shares; unknown keys are skipped.
/// Empty-result notices are left out when the envelope reports a failure.
fn render_sections(
    out: &mut impl Write,
    data: &Map<String, Value>,
    failed: bool,
) -> Result<(), CliError> {
    if let Some(Value::Array(matches)) = data.get("matches") {
        let rows = matches
            .iter()
            .map(|row| [text(&row["scheme_code"]), text(&row["scheme_name"])])
            .collect::<Vec<_>>();
        if !rows.is_empty() {
            writeln!(out)?;
            write_table(out, ["Scheme Code", "Scheme Name"], &rows)?;
        } else if !failed {
            writeln!(out)?;
            writeln!(out, "No matching schemes found.")?;
        }
    }

    if let Some(detail) = data.get("detail").filter(|detail| !detail.is_null()) {
        let detail: SchemeDetail = serde_json::from_value(detail.clone())?;
        writeln!(out)?;
        let rows = detail
            .rows()
            .iter()
            .map(|(label, value)| [(*label).to_owned(), (*value).to_owned()])
            .collect::<Vec<_>>();
        write_table(out, ["Field", "Value"], &rows)?;
    }

    if let Some(Value::Array(points)) = data.get("points") {
        let points = points
            .iter()
            .cloned()
            .map(serde_json::from_value::<NavPoint>)
            .collect::<Result<Vec<_>, _>>()?;
        if !points.is_empty() {
            let rows = points
                .iter()
                .map(|point| [point.date.to_string(), format!("{:.4}", point.value)])
                .collect::<Vec<_>>();
            writeln!(out)?;
            write_table(out, ["Date", "NAV"], &rows)?;
        } else if !failed {
            writeln!(out)?;
            writeln!(out, "No valid historical NAV data available for this scheme.")?;
        }
    }

    if let Some(Value::Array(pages)) = data.get("pages") {
        for page in pages {
            writeln!(out)?;
            writeln!(out, "{}", text(&page["title"]))?;
            writeln!(out, "{}", text(&page["subtitle"]))?;
            writeln!(out, "{}", text(&page["body"]))?;
        }
    }

    for nested in ["selected", "nav"] {
        if let Some(Value::Object(section)) = data.get(nested) {
            render_sections(out, section, failed)?;
        }
    }

    Ok(())
}

fn write_table<const N: usize>(
    out: &mut impl Write,
    headers: [&str; N],
    rows: &[[String; N]],
) -> io::Result<()> {
    let mut widths = headers.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    writeln!(out, "{}", line(headers.to_vec()))?;
    writeln!(
        out,
        "{}",
        widths.map(|width| "-".repeat(width)).join("  ")
    )?;
    for row in rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

fn text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
