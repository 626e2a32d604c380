use serde::Deserialize;
use serde::Serialize;

// one page of the site, in navigation order
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageDescriptor {
    pub filename: String,
    pub title: String,
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl PageDescriptor {
    pub fn new(filename: &str, title: &str, page_id: Option<&str>) -> Self {
        Self {
            filename: filename.to_string(),
            title: title.to_string(),
            page_id: page_id.map(str::to_string),
        }
    }

    pub fn link(&self) -> NavLink<'_> {
        NavLink {
            href: &self.filename,
            label: &self.title,
        }
    }
}

/// Target of a previous/next button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink<'a> {
    pub href: &'a str,
    pub label: &'a str,
}

/// A page together with its positional neighbours.
#[derive(Clone, Copy, Debug)]
pub struct NavEntry<'a> {
    pub index: usize,
    pub page: &'a PageDescriptor,
    pub prev: Option<NavLink<'a>>,
    pub next: Option<NavLink<'a>>,
}

pub const DEFAULT_PAGES: [(&str, &str, Option<&str>); 9] = [
    ("index.html", "Home", None),
    ("overview.html", "Overview", Some("overview")),
    ("section-01.html", "Inlet & Bell Mouth", Some("section-01")),
    ("section-02.html", "Ratios & Discharge", Some("section-02")),
    ("section-03.html", "Nose Cone & Torus", Some("section-03")),
    ("section-04.html", "Vanes & Spirals", Some("section-04")),
    ("section-05.html", "Micro-Vortex Gen", Some("section-05")),
    ("section-06.html", "Diffuser & Summary", Some("section-06")),
    ("appendix.html", "Appendix", Some("appendix")),
];

pub fn default_page_order() -> Vec<PageDescriptor> {
    DEFAULT_PAGES
        .iter()
        .map(|(filename, title, id)| PageDescriptor::new(filename, title, *id))
        .collect()
}

pub fn neighbours(pages: &[PageDescriptor], index: usize) -> (Option<NavLink<'_>>, Option<NavLink<'_>>) {
    let prev = index
        .checked_sub(1)
        .and_then(|i| pages.get(i))
        .map(PageDescriptor::link);
    let next = pages.get(index + 1).map(PageDescriptor::link);
    (prev, next)
}

pub fn entries(pages: &[PageDescriptor]) -> impl Iterator<Item = NavEntry<'_>> {
    pages.iter().enumerate().map(move |(index, page)| {
        let (prev, next) = neighbours(pages, index);
        NavEntry {
            index,
            page,
            prev,
            next,
        }
    })
}

// bare file name: no separators, no dot segments
pub fn is_bare_filename(filename: &str) -> bool {
    let trimmed = filename.trim();
    !trimmed.is_empty()
        && trimmed == filename
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}
