use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use thiserror::Error;
use tokio::time::Instant;

use crate::combine::{self, CombinedDocument, CombinedSection};
use crate::nav::{self, NavEntry, PageDescriptor};
use crate::output::console;
use crate::transform;

pub const DEFAULT_SITE_DIR: &str = "site";

#[derive(Clone, Debug)]
pub struct Options {
    pub site_dir: PathBuf,
    pub pages: Vec<PageDescriptor>,
    pub dry_run: bool,
    pub verbose: u8,
    pub show_progress: bool,
    pub document_title: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            pages: nav::default_page_order(),
            dry_run: false,
            verbose: 0,
            show_progress: false,
            document_title: combine::DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("page order is empty")]
    EmptyPageOrder,

    #[error("page listed more than once: {filename}")]
    DuplicatePage { filename: String },

    #[error("invalid page filename '{filename}', expected a bare file name")]
    InvalidFilename { filename: String },

    #[error("failed to read page: {path}: {source}")]
    PageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write page: {path}: {source}")]
    PageWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stylesheet: {path}: {source}")]
    StylesheetRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write combined document: {path}: {source}")]
    CombinedWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build progress bar style: {message}")]
    ProgressStyle { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    Updated,
    WouldUpdate,
    Skipped,
}

impl PageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::WouldUpdate => "would_update",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageReport {
    pub filename: String,
    pub title: String,
    pub path: PathBuf,
    pub outcome: PageOutcome,
    pub header_replaced: bool,
    pub nav_inserted: bool,
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    pub site_dir: PathBuf,
    pub dry_run: bool,
    pub elapsed: Duration,
    pub pages: Vec<PageReport>,
}

impl RunSummary {
    pub fn count(&self, outcome: PageOutcome) -> usize {
        self.pages.iter().filter(|p| p.outcome == outcome).count()
    }
}

pub fn validate_pages(pages: &[PageDescriptor]) -> Result<(), RunnerError> {
    if pages.is_empty() {
        return Err(RunnerError::EmptyPageOrder);
    }
    let mut seen = HashSet::new();
    for page in pages {
        if !nav::is_bare_filename(&page.filename) {
            return Err(RunnerError::InvalidFilename {
                filename: page.filename.clone(),
            });
        }
        if !seen.insert(page.filename.as_str()) {
            return Err(RunnerError::DuplicatePage {
                filename: page.filename.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        validate_pages(&options.pages)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Rewrites every page in order, one at a time. A missing page is skipped;
    /// any other I/O failure stops the run.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let started_at = Instant::now();
        let pb = self.progress_bar()?;

        let mut pages = Vec::with_capacity(self.options.pages.len());
        for entry in nav::entries(&self.options.pages) {
            pb.set_message(entry.page.filename.clone());
            let report = rewrite_entry(&self.options, &entry).await?;
            match report.outcome {
                PageOutcome::Skipped => console::page_skipped(&pb, &report.filename),
                _ => console::page_updated(&pb, &report.filename, self.options.dry_run),
            }
            if self.options.verbose > 0 && report.outcome != PageOutcome::Skipped {
                console::page_details(&pb, &report);
            }
            pages.push(report);
            pb.inc(1);
        }
        pb.finish_and_clear();
        console::completed(&pb, self.options.dry_run);

        Ok(RunSummary {
            site_dir: self.options.site_dir.clone(),
            dry_run: self.options.dry_run,
            elapsed: started_at.elapsed(),
            pages,
        })
    }

    /// Collects the `<main>` content of every existing page, in navigation
    /// order, into one print-ready document. Pages are only read.
    pub async fn combine(&self) -> Result<CombinedDocument, RunnerError> {
        let pb = self.progress_bar()?;
        let site_dir = tokio::fs::canonicalize(&self.options.site_dir)
            .await
            .unwrap_or_else(|_| self.options.site_dir.clone());
        let stylesheet = read_stylesheet(&site_dir).await?;

        let mut sections = Vec::new();
        let mut missing = Vec::new();
        for page in &self.options.pages {
            pb.set_message(page.filename.clone());
            let path = site_dir.join(&page.filename);
            let html = match tokio::fs::read_to_string(&path).await {
                Ok(html) => html,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    console::section_missing(&pb, &page.filename);
                    missing.push(page.filename.clone());
                    pb.inc(1);
                    continue;
                }
                Err(e) => {
                    return Err(RunnerError::PageRead {
                        path: path.display().to_string(),
                        source: e,
                    })
                }
            };
            let html = combine::fix_image_paths(&html, &site_dir);
            let extracted = combine::extract_page(&html, &page.filename);
            console::section_loaded(&pb, &page.filename, &extracted.title);
            sections.push(CombinedSection {
                filename: page.filename.clone(),
                title: extracted.title,
                main_content: extracted.main_content,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        let html = combine::render_document(&self.options.document_title, &stylesheet, &sections);
        Ok(CombinedDocument {
            html,
            sections,
            missing,
        })
    }

    pub async fn write_combined(&self, output: &Path) -> Result<CombinedDocument, RunnerError> {
        let document = self.combine().await?;
        tokio::fs::write(output, &document.html)
            .await
            .map_err(|e| RunnerError::CombinedWrite {
                path: output.display().to_string(),
                source: e,
            })?;
        Ok(document)
    }

    fn progress_bar(&self) -> Result<ProgressBar, RunnerError> {
        if !self.options.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(self.options.pages.len() as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(":: Progress: [{pos}/{len}] :: {msg}")
                .map_err(|e| RunnerError::ProgressStyle {
                    message: e.to_string(),
                })?
                .progress_chars(r#"#>-"#),
        );
        Ok(pb)
    }
}

// a site without a stylesheet still combines, unstyled
async fn read_stylesheet(site_dir: &Path) -> Result<String, RunnerError> {
    let path = site_dir.join(combine::STYLESHEET_PATH);
    match tokio::fs::read_to_string(&path).await {
        Ok(css) => Ok(css),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(RunnerError::StylesheetRead {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

async fn rewrite_entry(options: &Options, entry: &NavEntry<'_>) -> Result<PageReport, RunnerError> {
    let path = options.site_dir.join(&entry.page.filename);
    let mut report = PageReport {
        filename: entry.page.filename.clone(),
        title: entry.page.title.clone(),
        path: path.clone(),
        outcome: PageOutcome::Skipped,
        header_replaced: false,
        nav_inserted: false,
    };

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(report),
        Err(e) => {
            return Err(RunnerError::PageRead {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    let rewrite = transform::rewrite_page(&content, entry.prev, entry.next);
    report.header_replaced = rewrite.header_replaced;
    report.nav_inserted = rewrite.nav_inserted;

    if options.dry_run {
        report.outcome = PageOutcome::WouldUpdate;
        return Ok(report);
    }

    tokio::fs::write(&path, rewrite.content)
        .await
        .map_err(|e| RunnerError::PageWrite {
            path: path.display().to_string(),
            source: e,
        })?;
    report.outcome = PageOutcome::Updated;
    Ok(report)
}
