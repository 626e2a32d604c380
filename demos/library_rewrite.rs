use sitenav::runner::{Options, PageOutcome, Runner};
use std::error::Error;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        site_dir: PathBuf::from("./site"),
        dry_run: true,
        ..Options::default()
    })?;
    let summary = runner.run().await?;

    println!("Pages: {}", summary.pages.len());
    println!("Skipped: {}", summary.count(PageOutcome::Skipped));
    for page in summary.pages.iter() {
        println!(
            "{} {} header={} nav={}",
            page.outcome.as_str(),
            page.filename,
            page.header_replaced,
            page.nav_inserted
        );
    }

    Ok(())
}
