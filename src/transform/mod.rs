use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::nav::NavLink;

pub const HEADER_PATTERN: &str = r#"(?s)<header class="site-header">.*?</header>"#;
pub const FOOTER_PATTERN: &str = r#"<footer class="site-footer">"#;
pub const HEADER_PLACEHOLDER: &str = r#"<div id="header-placeholder"></div>"#;

static HEADER_RE: OnceLock<Regex> = OnceLock::new();
static FOOTER_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern compiles"))
}

fn footer_re() -> &'static Regex {
    FOOTER_RE.get_or_init(|| Regex::new(FOOTER_PATTERN).expect("footer pattern compiles"))
}

/// Output of [`rewrite_page`]. The flags only describe what matched; a page
/// with neither a header nor a footer comes back unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub header_replaced: bool,
    pub nav_inserted: bool,
}

/// Renders the pagination block inserted ahead of the footer.
///
/// Labels and hrefs are written as-is; page titles such as
/// `Inlet & Bell Mouth` are not entity-escaped.
pub fn render_nav_block(prev: Option<NavLink<'_>>, next: Option<NavLink<'_>>) -> String {
    let mut out = String::from("\n    <nav class=\"page-navigation\">\n");

    match prev {
        Some(link) => out.push_str(&format!(
            "        <a href=\"{}\" class=\"nav-button nav-button-prev\">{}</a>\n",
            link.href, link.label
        )),
        None => out.push_str("        <span class=\"nav-button nav-button-prev disabled\">Previous</span>\n"),
    }

    match next {
        Some(link) => out.push_str(&format!(
            "        <a href=\"{}\" class=\"nav-button nav-button-next\">{}</a>\n",
            link.href, link.label
        )),
        None => out.push_str("        <span class=\"nav-button nav-button-next disabled\">Next</span>\n"),
    }

    out.push_str("    </nav>\n\n");
    out
}

pub fn replace_header(html: &str) -> (String, bool) {
    let re = header_re();
    if !re.is_match(html) {
        return (html.to_string(), false);
    }
    (re.replace(html, NoExpand(HEADER_PLACEHOLDER)).into_owned(), true)
}

pub fn insert_nav_before_footer(html: &str, nav_html: &str) -> (String, bool) {
    let Some(m) = footer_re().find(html) else {
        return (html.to_string(), false);
    };
    let mut out = String::with_capacity(html.len() + nav_html.len());
    out.push_str(&html[..m.start()]);
    out.push_str(nav_html);
    out.push_str(&html[m.start()..]);
    (out, true)
}

/// Swaps the site header for the placeholder and inserts the prev/next block
/// before the first footer. Running it twice inserts a second block.
pub fn rewrite_page(html: &str, prev: Option<NavLink<'_>>, next: Option<NavLink<'_>>) -> Rewrite {
    let (content, header_replaced) = replace_header(html);
    let nav_html = render_nav_block(prev, next);
    let (content, nav_inserted) = insert_nav_before_footer(&content, &nav_html);
    Rewrite {
        content,
        header_replaced,
        nav_inserted,
    }
}
