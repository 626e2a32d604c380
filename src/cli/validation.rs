use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text or json"
            ));
        }
    }
    if let Some(dir) = args.site_dir.as_deref() {
        if dir.trim().is_empty() {
            return Err("invalid --dir, expected a directory path".to_string());
        }
    }
    if let Some(out) = args.output.as_deref() {
        if out.trim().is_empty() {
            return Err("invalid --output, expected a file path".to_string());
        }
    }
    if let Some(path) = args.combine.as_deref() {
        if path.trim().is_empty() {
            return Err("invalid --combine, expected a file path".to_string());
        }
        if args.dry_run {
            return Err("--combine never writes pages, drop --dry-run".to_string());
        }
    }
    if args.init_config && args.dry_run {
        return Err("--init-config cannot be combined with --dry-run".to_string());
    }
    Ok(())
}
