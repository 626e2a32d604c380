use colored::Colorize;
use indicatif::ProgressBar;

use crate::runner::{PageOutcome, PageReport, RunSummary};

fn emit(pb: &ProgressBar, line: String) {
    pb.suspend(|| println!("{line}"));
}

pub fn updated_line(filename: &str, dry_run: bool) -> String {
    let verb = if dry_run { "Would update" } else { "Updated" };
    format!("{} {}", verb.green(), filename)
}

pub fn skipped_line(filename: &str) -> String {
    format!("{} {} - file not found", "Skipping".yellow(), filename)
}

// -v: which patterns matched
pub fn details_line(report: &PageReport) -> String {
    let mark = |hit: bool| if hit { "yes".green() } else { "no".red() };
    format!(
        ":: {:<20} header: {} :: nav: {}",
        report.filename,
        mark(report.header_replaced),
        mark(report.nav_inserted)
    )
}

pub fn completed_line(dry_run: bool) -> String {
    if dry_run {
        "Dry run complete, no files written.".bold().to_string()
    } else {
        "All files updated successfully!".bold().to_string()
    }
}

pub fn summary_line(summary: &RunSummary) -> String {
    let skipped = summary.count(PageOutcome::Skipped);
    let millis = summary.elapsed.as_millis();
    let site = summary.site_dir.display();
    if summary.dry_run {
        format!(
            ":: Completed :: {site} :: {} would update, {} updated, {skipped} skipped in {millis}ms (dry run) ::",
            summary.count(PageOutcome::WouldUpdate),
            summary.count(PageOutcome::Updated),
        )
    } else {
        format!(
            ":: Completed :: {site} :: {} updated, {skipped} skipped in {millis}ms ::",
            summary.count(PageOutcome::Updated),
        )
    }
}

pub fn loaded_line(filename: &str, title: &str) -> String {
    format!("  {} {} - \"{}\"", "Loaded:".green(), filename, title)
}

pub fn missing_section_line(filename: &str) -> String {
    format!("  {} {}", "Skipping missing file:".yellow(), filename)
}

pub fn page_updated(pb: &ProgressBar, filename: &str, dry_run: bool) {
    emit(pb, updated_line(filename, dry_run));
}

pub fn page_skipped(pb: &ProgressBar, filename: &str) {
    emit(pb, skipped_line(filename));
}

pub fn page_details(pb: &ProgressBar, report: &PageReport) {
    emit(pb, details_line(report));
}

pub fn completed(pb: &ProgressBar, dry_run: bool) {
    emit(pb, String::new());
    emit(pb, completed_line(dry_run));
}

pub fn section_loaded(pb: &ProgressBar, filename: &str, title: &str) {
    emit(pb, loaded_line(filename, title));
}

pub fn section_missing(pb: &ProgressBar, filename: &str) {
    emit(pb, missing_section_line(filename));
}
