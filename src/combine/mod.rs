//! Builds a single print-ready HTML document out of the site pages, one
//! section per page in navigation order.

use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

pub const DEFAULT_DOCUMENT_TITLE: &str = "WindCatcher — Technical Documentation";

/// Stylesheet embedded into the combined document, relative to the site dir.
pub const STYLESHEET_PATH: &str = "assets/css/main.css";

const PRINT_STYLES: &str = r#"
    /* PDF-specific overrides */
    @page {
      size: A4;
      margin: 20mm 18mm 20mm 18mm;
    }

    * {
      box-sizing: border-box;
    }

    body {
      font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif;
      line-height: 1.7;
      color: #1a1a1a;
      background: #ffffff;
    }

    .content-container {
      max-width: 100%;
      margin: 0;
      padding: 0;
    }

    .pdf-section {
      padding: 0;
      margin: 0;
    }

    /* Hide navigation elements */
    .page-navigation,
    .site-header,
    .site-footer,
    #header-placeholder,
    .primary-link,
    nav {
      display: none !important;
    }

    img {
      max-width: 100%;
      height: auto;
      display: block;
      margin: 1rem auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    th, td {
      padding: 0.4rem 0.5rem;
      border-bottom: 1px solid #ddd;
    }

    h1, h2, h3, h4 {
      page-break-after: avoid;
    }

    p, li, table {
      page-break-inside: avoid;
    }
"#;

static TITLE_RE: OnceLock<Regex> = OnceLock::new();
static MAIN_RE: OnceLock<Regex> = OnceLock::new();
static SRC_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern compiles"))
}

fn main_re() -> &'static Regex {
    MAIN_RE.get_or_init(|| Regex::new(r"(?is)<main[^>]*>(.*?)</main>").expect("main pattern compiles"))
}

fn src_re() -> &'static Regex {
    SRC_RE.get_or_init(|| Regex::new(r#"src="([^"]+)""#).expect("src pattern compiles"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub main_content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinedSection {
    pub filename: String,
    pub title: String,
    pub main_content: String,
}

#[derive(Clone, Debug)]
pub struct CombinedDocument {
    pub html: String,
    pub sections: Vec<CombinedSection>,
    pub missing: Vec<String>,
}

/// Pulls the `<title>` text and the inner `<main>` markup out of a page.
/// Falls back to the filename for the title and a `<p>{filename}</p>` body.
pub fn extract_page(html: &str, filename: &str) -> ExtractedPage {
    let title = title_re()
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| filename.to_string());
    let main_content = main_re()
        .captures(html)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| format!("<p>{filename}</p>"));
    ExtractedPage {
        title,
        main_content,
    }
}

fn is_external_src(src: &str) -> bool {
    src.starts_with("http") || src.starts_with("data:") || Path::new(src).is_absolute()
}

/// Rewrites relative `src="..."` attributes to `file:///` URLs under `site_dir`.
pub fn fix_image_paths(html: &str, site_dir: &Path) -> String {
    src_re()
        .replace_all(html, |caps: &Captures| {
            let src = &caps[1];
            if is_external_src(src) {
                return caps[0].to_string();
            }
            let abs = site_dir.join(src).to_string_lossy().replace('\\', "/");
            format!("src=\"file:///{}\"", abs.trim_start_matches('/'))
        })
        .into_owned()
}

pub fn render_sections(sections: &[CombinedSection]) -> String {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let page_break = if i == 0 { "" } else { "page-break-before: always;" };
            format!(
                "\n      <div class=\"pdf-section\" style=\"{page_break}\">\n        {}\n      </div>",
                s.main_content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_document(title: &str, stylesheet: &str, sections: &[CombinedSection]) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\" />\n  <title>{title}</title>\n  <style>\n    {stylesheet}\n{PRINT_STYLES}  </style>\n</head>\n<body>\n  {}\n</body>\n</html>",
        render_sections(sections)
    )
}
