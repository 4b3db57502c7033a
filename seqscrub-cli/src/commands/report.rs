//! Report command implementation - export validation results to JSON or CSV

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

use seqscrub_core::{parse, summarize, validate, Report};

use crate::config::Config;
use crate::input;
use crate::ReportFormat;

pub fn execute(
    config: &Config,
    input: PathBuf,
    out: PathBuf,
    format: Option<ReportFormat>,
    sanitize: bool,
    min_length: Option<usize>,
) -> Result<()> {
    log::info!("Generating report for: {}", input.display());

    let text = input::read_input(&input)?;
    let records = parse(&text).context("Failed to parse input file")?;
    log::info!("Parsed {} records", records.len());

    let engine_config = config.validate_config(sanitize, min_length);
    let validated = validate(&records, &engine_config);
    let report = Report::build(summarize(&validated), validated);

    let format = resolve_format(&out, format, config);
    log::info!("Report format: {:?}", format);

    let generated_at = Utc::now().to_rfc3339();
    let body = match format {
        ReportFormat::Json => render_json(&report, &generated_at)?,
        ReportFormat::Csv => render_csv(&report, &generated_at),
    };

    std::fs::write(&out, body)
        .with_context(|| format!("Failed to write report file: {}", out.display()))?;
    log::info!("Report written to: {}", out.display());

    Ok(())
}

fn resolve_format(out: &Path, flag: Option<ReportFormat>, config: &Config) -> ReportFormat {
    if let Some(format) = flag {
        return format;
    }

    if let Some(extension) = out.extension() {
        match extension.to_string_lossy().to_lowercase().as_str() {
            "json" => return ReportFormat::Json,
            "csv" => return ReportFormat::Csv,
            _ => {}
        }
    }

    match config.report.format.to_lowercase().as_str() {
        "json" => ReportFormat::Json,
        "csv" => ReportFormat::Csv,
        other => {
            log::warn!(
                "Unknown report format {:?} in configuration, defaulting to JSON",
                other
            );
            ReportFormat::Json
        }
    }
}

/// The report structure serialized as-is, with the generation timestamp
/// stamped in at the top level. The engine itself has no clock.
fn render_json(report: &Report, generated_at: &str) -> Result<String> {
    let mut doc = serde_json::to_value(report).context("Failed to serialize report")?;
    if let serde_json::Value::Object(map) = &mut doc {
        map.insert(
            "generated_at".to_string(),
            serde_json::Value::String(generated_at.to_string()),
        );
    }
    let mut body = serde_json::to_string_pretty(&doc).context("Failed to serialize report")?;
    body.push('\n');
    Ok(body)
}

/// One summary block followed by one row per record.
fn render_csv(report: &Report, generated_at: &str) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    push_row(&mut out, &["seqscrub report"]);
    push_row(&mut out, &["Generated", generated_at]);
    push_row(&mut out, &["Tool version", &report.tool_version]);
    out.push('\n');

    push_row(&mut out, &["SUMMARY"]);
    push_row(&mut out, &["Total sequences", &summary.total_count.to_string()]);
    push_row(&mut out, &["Valid sequences", &summary.valid_count.to_string()]);
    push_row(&mut out, &["Invalid sequences", &summary.invalid_count.to_string()]);
    push_row(&mut out, &["Sanitized sequences", &summary.sanitized_count.to_string()]);
    push_row(
        &mut out,
        &[
            "Average GC content",
            &format!("{:.2}%", summary.avg_gc_content * 100.0),
        ],
    );
    push_row(&mut out, &["Min length", &summary.min_length.to_string()]);
    push_row(&mut out, &["Max length", &summary.max_length.to_string()]);
    push_row(&mut out, &["Average length", &format!("{:.2}", summary.avg_length)]);
    push_row(&mut out, &["Median length", &summary.median_length.to_string()]);
    push_row(&mut out, &["Total length", &summary.total_length.to_string()]);
    out.push('\n');

    push_row(&mut out, &["ERROR COUNTS"]);
    for (code, count) in &summary.error_histogram {
        push_row(&mut out, &[&code.to_string(), &count.to_string()]);
    }
    out.push('\n');

    push_row(&mut out, &["TOP LONGEST"]);
    push_row(&mut out, &["Rank", "Header", "Length"]);
    for (rank, entry) in summary.top_longest.iter().enumerate() {
        push_row(
            &mut out,
            &[&(rank + 1).to_string(), &entry.header, &entry.length.to_string()],
        );
    }
    out.push('\n');

    push_row(&mut out, &["RECORDS"]);
    push_row(
        &mut out,
        &["Index", "Header", "Length", "GC%", "Valid", "Invalid chars", "Errors"],
    );
    for (index, record) in report.records.iter().enumerate() {
        let errors: Vec<String> = record.errors.iter().map(|e| e.to_string()).collect();
        push_row(
            &mut out,
            &[
                &index.to_string(),
                &record.header,
                &record.length.to_string(),
                &format!("{:.2}", record.gc_content * 100.0),
                if record.is_valid { "yes" } else { "no" },
                &record.invalid_char_count.to_string(),
                &errors.join("; "),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_field(field));
    }
    out.push('\n');
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
