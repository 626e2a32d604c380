use std::path::{Path, PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::combine;
use crate::config::{self, ConfigFile};
use crate::nav::{self, PageDescriptor};
use crate::output::{self, OutputFormat};
use crate::runner::{self, Options, RunSummary, Runner};

fn print_banner() {
    println!(":: sitenav v{} ::", env!("CARGO_PKG_VERSION"));
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    site_dir: PathBuf,
    pages: Vec<PageDescriptor>,
    config_path: Option<PathBuf>,
    dry_run: bool,
    no_color: bool,
    progress: bool,
    verbose: u8,
    output: Option<String>,
    output_format: OutputFormat,
    combine: Option<String>,
    document_title: String,
}

fn resolve_output_format(explicit: Option<&str>, output: Option<&str>) -> Result<OutputFormat, String> {
    if let Some(raw) = explicit {
        return OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"));
    }
    Ok(output
        .and_then(output::infer_format_from_path)
        .unwrap_or(OutputFormat::Text))
}

fn build_run_config(args: CliArgs, cfg: ConfigFile, config_path: Option<PathBuf>) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let site_dir = args
        .site_dir
        .or(cfg.site_dir)
        .map(|dir| config::expand_tilde(&dir))
        .unwrap_or_else(|| PathBuf::from(runner::DEFAULT_SITE_DIR));
    let pages = cfg.pages.unwrap_or_else(nav::default_page_order);
    runner::validate_pages(&pages).map_err(|e| format!("invalid page order: {e}"))?;

    let dry_run = args.dry_run || cfg.dry_run.unwrap_or(false);
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let progress = args.progress || cfg.progress.unwrap_or(false);

    let output = args.output.or(cfg.output);
    let output_format_raw = args.output_format.or(cfg.output_format);
    let output_format = resolve_output_format(output_format_raw.as_deref(), output.as_deref())?;

    let combine_output = args.combine.or(cfg.combine);
    let document_title = args
        .title
        .or(cfg.document_title)
        .unwrap_or_else(|| combine::DEFAULT_DOCUMENT_TITLE.to_string());

    Ok(RunConfig {
        site_dir,
        pages,
        config_path,
        dry_run,
        no_color,
        progress,
        verbose: args.verbose,
        output,
        output_format,
        combine: combine_output,
        document_title,
    })
}

async fn write_report(path: &str, format: OutputFormat, summary: &RunSummary) -> Result<(), String> {
    let rendered = output::render(format, summary);
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|e| format!("failed to write output file: {e}"))?;
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();
    format_kv_line("Site", &run.site_dir.display().to_string());
    format_kv_line("Pages", &run.pages.len().to_string());
    if let Some(path) = run.config_path.as_ref() {
        format_kv_line("Config", &path.display().to_string());
    }
    if run.dry_run {
        format_kv_line("Mode", "dry run");
    }
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Output", path);
    }
    if let Some(path) = run.combine.as_deref() {
        format_kv_line("Combine", path);
    }
    println!();

    let runner = Runner::new(Options {
        site_dir: run.site_dir.clone(),
        pages: run.pages.clone(),
        dry_run: run.dry_run,
        verbose: run.verbose,
        show_progress: run.progress,
        document_title: run.document_title.clone(),
    })
    .map_err(|e| e.to_string())?;

    if let Some(path) = run.combine.as_deref() {
        let document = runner
            .write_combined(Path::new(path))
            .await
            .map_err(|e| e.to_string())?;
        println!();
        println!(
            "Combined HTML saved: {} ({} sections, {} missing)",
            path,
            document.sections.len(),
            document.missing.len()
        );
        return Ok(());
    }

    let summary = runner.run().await.map_err(|e| e.to_string())?;

    if let Some(path) = run.output.as_deref() {
        write_report(path, run.output_format, &summary).await?;
    }

    if run.verbose > 0 {
        println!("{}", output::console::summary_line(&summary));
    }

    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<(), String> {
    let path = path
        .or_else(config::default_config_path)
        .ok_or_else(|| "unable to determine config path, pass --config".to_string())?;
    if config::ensure_default_config_file(&path)? {
        println!("wrote config to {}", path.display());
    } else {
        println!("config already exists at {}", path.display());
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", CliArgs::command().render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if args.init_config {
        validation::validate(&args)?;
        return init_config(user_config_path);
    }

    let (cfg, config_path) = match user_config_path {
        Some(path) => (config::load_config(&path, false)?, Some(path)),
        None => match config::default_config_path().filter(|p| p.exists()) {
            Some(path) => (config::load_config(&path, true)?, Some(path)),
            None => (ConfigFile::default(), None),
        },
    };

    let run = build_run_config(args, cfg, config_path)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
