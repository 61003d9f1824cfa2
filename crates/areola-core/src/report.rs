use std::fmt::Write;

use serde::Serialize;

use crate::sweep::{filter::filter, AnomalyRecord, SweepResult, SweepStats};

/// Format styles supported by the default renderers.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Placeholder shown by the auditor view while the store holds no data.
/// Terminal state; there is no polling and no retry.
pub const WAITING_PLACEHOLDER: &str = "Waiting for Audit Stream...";

/// Render the dashboard summary panel for a sweep result.
pub fn render_summary(result: &SweepResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_summary_human(result),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonSummary::from(result))?),
    }
}

fn verdict(stats: &SweepStats) -> &'static str {
    if stats.found > 0 {
        "ANOMALY"
    } else {
        "SECURE"
    }
}

fn render_summary_human(result: &SweepResult) -> anyhow::Result<String> {
    let stats = &result.stats;
    let mut out = String::new();
    writeln!(out, "Sweep Summary")?;
    writeln!(out, "  Total Scanned: {}", stats.total)?;
    writeln!(out, "  Flagged:       {}", stats.found)?;
    writeln!(out, "  Total At Risk: ${:.2}", stats.exposure)?;
    writeln!(out, "  Avg Theft:     ${:.2}", stats.avg)?;
    writeln!(out, "  Verdict:       {}", verdict(stats))?;

    if !result.anomalies.is_empty() {
        writeln!(out)?;
        writeln!(out, "Raw Audit Preview:")?;
        for record in &result.anomalies {
            writeln!(
                out,
                "  - {id}  {amount}  {score}% match  artifact {artifact}",
                id = record.id,
                amount = record.amount,
                score = record.score,
                artifact = record.artifact,
            )?;
        }
    }

    Ok(out)
}

/// Render the auditor table over the rows the query keeps.
pub fn render_table(
    result: &SweepResult,
    query: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rows = filter(&result.anomalies, query);
    match format {
        OutputFormat::Human => render_table_human(result, query, &rows),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonTable {
            stats: &result.stats,
            query,
            anomalies: &rows,
        })?),
    }
}

fn render_table_human(
    result: &SweepResult,
    query: &str,
    rows: &[AnomalyRecord],
) -> anyhow::Result<String> {
    let stats = &result.stats;
    let mut out = String::new();
    writeln!(out, "Comprehensive Audit")?;
    writeln!(
        out,
        "  Total Scanned: {total}  Flagged: {found}  Exposure at Risk: ${exposure:.2}",
        total = stats.total,
        found = stats.found,
        exposure = stats.exposure,
    )?;
    if !query.is_empty() {
        writeln!(out, "  Filter: \"{query}\" ({} matched)", rows.len())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{:<32} {:<14} {:>5}  {}",
        "TRANSACTION SIGNATURE", "AMOUNT", "RISK", "ARTIFACT"
    )?;
    if rows.is_empty() {
        writeln!(out, "{:^64}", "No records match your filter")?;
        return Ok(out);
    }
    for record in rows {
        writeln!(
            out,
            "{:<32} {:<14} {:>4}%  {}",
            record.id, record.amount, record.score, record.artifact
        )?;
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    stats: &'a SweepStats,
    verdict: &'static str,
    anomalies: &'a [AnomalyRecord],
}

impl<'a> From<&'a SweepResult> for JsonSummary<'a> {
    fn from(result: &'a SweepResult) -> Self {
        Self {
            stats: &result.stats,
            verdict: verdict(&result.stats),
            anomalies: &result.anomalies,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonTable<'a> {
    stats: &'a SweepStats,
    query: &'a str,
    anomalies: &'a [AnomalyRecord],
}
