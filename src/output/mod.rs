pub mod console;

use serde::Serialize;

use crate::runner::{PageOutcome, RunSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub filename: String,
    pub title: String,
    pub path: String,
    pub outcome: PageOutcome,
    pub header_replaced: bool,
    pub nav_inserted: bool,
}

pub fn build_records(summary: &RunSummary) -> Vec<OutputRecord> {
    summary
        .pages
        .iter()
        .map(|p| OutputRecord {
            filename: p.filename.clone(),
            title: p.title.clone(),
            path: p.path.display().to_string(),
            outcome: p.outcome,
            header_replaced: p.header_replaced,
            nav_inserted: p.nav_inserted,
        })
        .collect()
}

pub fn render_text(records: &[OutputRecord]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(r.outcome.as_str());
        out.push('\t');
        out.push_str(&r.filename);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(records: &[OutputRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render(format: OutputFormat, summary: &RunSummary) -> Vec<u8> {
    let records = build_records(summary);
    match format {
        OutputFormat::Text => render_text(&records),
        OutputFormat::Json => render_json(&records),
    }
}
