use std::fs;
use std::path::Path;

use crate::nav::{self, PageDescriptor};
use crate::runner::{Options, PageOutcome, Runner, RunnerError};
use crate::transform::HEADER_PLACEHOLDER;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
    <header class="site-header">
        <nav class="nav-container">
            <a href="index.html" class="nav-logo">WindCatcher</a>
        </nav>
    </header>
    <main>content</main>
    <footer class="site-footer">
        <p>footer</p>
    </footer>
</body>
</html>
"#;

fn write_page(dir: &Path, name: &str) {
    fs::write(dir.join(name), PAGE).unwrap();
}

fn options(dir: &Path) -> Options {
    Options {
        site_dir: dir.to_path_buf(),
        ..Options::default()
    }
}

fn nav_block(content: &str) -> &str {
    let start = content.find("<nav class=\"page-navigation\">").unwrap();
    let end = content[start..].find("</nav>").unwrap() + start;
    &content[start..end]
}

#[tokio::test]
async fn rewrites_every_existing_page_in_order() {
    let dir = tempfile::tempdir().unwrap();
    for (filename, _, _) in nav::DEFAULT_PAGES {
        write_page(dir.path(), filename);
    }

    let summary = Runner::new(options(dir.path())).unwrap().run().await.unwrap();
    assert_eq!(summary.pages.len(), 9);
    assert_eq!(summary.count(PageOutcome::Updated), 9);

    let pages = nav::default_page_order();
    for (i, page) in pages.iter().enumerate() {
        let content = fs::read_to_string(dir.path().join(&page.filename)).unwrap();
        assert_eq!(content.matches(HEADER_PLACEHOLDER).count(), 1);
        assert!(!content.contains("site-header"));
        assert_eq!(content.matches("<nav class=\"page-navigation\">").count(), 1);
        assert!(content.contains("    </nav>\n\n<footer class=\"site-footer\">"));

        let block = nav_block(&content);
        match i.checked_sub(1).map(|p| &pages[p]) {
            Some(prev) => assert!(block.contains(&format!(
                "<a href=\"{}\" class=\"nav-button nav-button-prev\">{}</a>",
                prev.filename, prev.title
            ))),
            None => assert!(block.contains("<span class=\"nav-button nav-button-prev disabled\">Previous</span>")),
        }
        match pages.get(i + 1) {
            Some(next) => assert!(block.contains(&format!(
                "<a href=\"{}\" class=\"nav-button nav-button-next\">{}</a>",
                next.filename, next.title
            ))),
            None => assert!(block.contains("<span class=\"nav-button nav-button-next disabled\">Next</span>")),
        }
    }
}

#[tokio::test]
async fn ratios_page_links_to_its_neighbours() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "section-02.html");

    Runner::new(options(dir.path())).unwrap().run().await.unwrap();

    let content = fs::read_to_string(dir.path().join("section-02.html")).unwrap();
    assert!(content.contains("<body>\n    <div id=\"header-placeholder\"></div>\n    <main>"));
    let block = nav_block(&content);
    assert!(block.contains(">Inlet & Bell Mouth</a>"));
    assert!(block.contains(">Nose Cone & Torus</a>"));
}

#[tokio::test]
async fn missing_pages_are_skipped_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "overview.html");

    let summary = Runner::new(options(dir.path())).unwrap().run().await.unwrap();
    assert_eq!(summary.count(PageOutcome::Updated), 1);
    assert_eq!(summary.count(PageOutcome::Skipped), 8);
    assert_eq!(summary.pages[0].outcome, PageOutcome::Skipped);
    assert!(!dir.path().join("index.html").exists());

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn missing_site_dir_skips_everything() {
    let dir = tempfile::tempdir().unwrap();
    let summary = Runner::new(options(&dir.path().join("absent")))
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(summary.count(PageOutcome::Skipped), 9);
    assert!(!dir.path().join("absent").exists());
}

#[tokio::test]
async fn second_run_inserts_another_nav_block() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "index.html");
    let runner = Runner::new(options(dir.path())).unwrap();

    runner.run().await.unwrap();
    let summary = runner.run().await.unwrap();

    let report = &summary.pages[0];
    assert!(!report.header_replaced);
    assert!(report.nav_inserted);
    let content = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(content.matches("<nav class=\"page-navigation\">").count(), 2);
    assert_eq!(content.matches(HEADER_PLACEHOLDER).count(), 1);
}

#[tokio::test]
async fn dry_run_leaves_files_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "appendix.html");

    let summary = Runner::new(Options {
        dry_run: true,
        ..options(dir.path())
    })
    .unwrap()
    .run()
    .await
    .unwrap();

    let report = summary.pages.iter().find(|p| p.filename == "appendix.html").unwrap();
    assert_eq!(report.outcome, PageOutcome::WouldUpdate);
    assert!(report.header_replaced);
    assert!(report.nav_inserted);
    assert_eq!(fs::read_to_string(dir.path().join("appendix.html")).unwrap(), PAGE);
}

#[tokio::test]
async fn page_without_markers_is_rewritten_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let plain = "<html><body><p>plain</p></body></html>\n";
    fs::write(dir.path().join("index.html"), plain).unwrap();

    let summary = Runner::new(options(dir.path())).unwrap().run().await.unwrap();
    let report = &summary.pages[0];
    assert_eq!(report.outcome, PageOutcome::Updated);
    assert!(!report.header_replaced);
    assert!(!report.nav_inserted);
    assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), plain);
}

#[tokio::test]
async fn custom_page_order_drives_navigation() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "b.html");

    let pages = vec![
        PageDescriptor::new("a.html", "Alpha", None),
        PageDescriptor::new("b.html", "Beta", Some("b")),
        PageDescriptor::new("c.html", "Gamma", Some("c")),
    ];
    Runner::new(Options {
        pages,
        ..options(dir.path())
    })
    .unwrap()
    .run()
    .await
    .unwrap();

    let content = fs::read_to_string(dir.path().join("b.html")).unwrap();
    let block = nav_block(&content);
    assert!(block.contains("<a href=\"a.html\" class=\"nav-button nav-button-prev\">Alpha</a>"));
    assert!(block.contains("<a href=\"c.html\" class=\"nav-button nav-button-next\">Gamma</a>"));
}

#[tokio::test]
async fn non_utf8_page_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), [0xff, 0xfe, 0x00]).unwrap();
    write_page(dir.path(), "overview.html");

    let err = Runner::new(options(dir.path())).unwrap().run().await.unwrap_err();
    assert!(matches!(err, RunnerError::PageRead { .. }));
    assert_eq!(fs::read_to_string(dir.path().join("overview.html")).unwrap(), PAGE);
}

fn write_section(dir: &Path, name: &str, title: &str, body: &str) {
    let html = format!(
        "<html><head><title>{title}</title></head><body>\n<header class=\"site-header\">menu</header>\n<main>{body}</main>\n</body></html>\n"
    );
    fs::write(dir.join(name), html).unwrap();
}

#[tokio::test]
async fn combine_collects_main_content_in_navigation_order() {
    let dir = tempfile::tempdir().unwrap();
    write_section(dir.path(), "appendix.html", "Appendix", "<p>last</p>");
    write_section(dir.path(), "index.html", "Home", "<p>first</p>");
    write_section(dir.path(), "section-02.html", "Ratios", "<img src=\"img/ratio.png\">");
    fs::create_dir_all(dir.path().join("assets/css")).unwrap();
    fs::write(dir.path().join("assets/css/main.css"), "body { margin: 0; }").unwrap();

    let out = dir.path().join("combined.html");
    let document = Runner::new(options(dir.path()))
        .unwrap()
        .write_combined(&out)
        .await
        .unwrap();

    let names: Vec<_> = document.sections.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, vec!["index.html", "section-02.html", "appendix.html"]);
    assert_eq!(document.sections[1].title, "Ratios");
    assert_eq!(document.missing.len(), 6);
    assert!(document.missing.contains(&"overview.html".to_string()));

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html, document.html);
    assert!(html.contains("body { margin: 0; }"));
    assert!(!html.contains("site-header\">menu"));
    assert!(html.contains("img/ratio.png\""));
    assert!(html.contains("src=\"file:///"));
    assert!(!html.contains("src=\"img/ratio.png\""));
    let first = html.find("<p>first</p>").unwrap();
    let last = html.find("<p>last</p>").unwrap();
    assert!(first < last);
    assert_eq!(html.matches("page-break-before: always;\"").count(), 2);
}

#[tokio::test]
async fn combine_leaves_pages_untouched_and_tolerates_missing_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "overview.html");

    let document = Runner::new(options(dir.path())).unwrap().combine().await.unwrap();
    assert_eq!(document.sections.len(), 1);
    assert_eq!(document.sections[0].main_content, "content");
    assert_eq!(document.sections[0].title, "overview.html");
    assert_eq!(fs::read_to_string(dir.path().join("overview.html")).unwrap(), PAGE);
    assert!(!dir.path().join("combined.html").exists());
}

#[tokio::test]
async fn combine_with_no_pages_present_yields_empty_body() {
    let dir = tempfile::tempdir().unwrap();
    let document = Runner::new(options(dir.path())).unwrap().combine().await.unwrap();
    assert!(document.sections.is_empty());
    assert_eq!(document.missing.len(), 9);
    assert!(!document.html.contains("pdf-section\""));
}
