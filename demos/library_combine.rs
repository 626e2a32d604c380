use sitenav::runner::{Options, Runner};
use std::error::Error;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        site_dir: PathBuf::from("./site"),
        document_title: "Site Handbook".to_string(),
        ..Options::default()
    })?;
    let document = runner.write_combined(Path::new("./combined.html")).await?;

    println!("Sections: {}", document.sections.len());
    for missing in document.missing.iter() {
        println!("missing {missing}");
    }

    Ok(())
}
