use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sitenav",
    version,
    about = "static site header/pagination rewriter",
    long_about = "sitenav replaces each page's embedded site header with a shared placeholder and inserts previous/next navigation before the page footer.\n\nExamples:\n  sitenav\n  sitenav --dir ./public --dry-run\n  sitenav --config ~/.sitenav/config.yml -o report.json\n\nTip: Use --init-config to write a starter config listing the page order."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v shows which patterns matched per page)."
    )]
    pub verbose: u8,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'P',
        long = "pg",
        visible_alias = "progress",
        help_heading = "Output",
        help = "Show a progress bar on stderr."
    )]
    pub progress: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write a run report to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Report format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'd',
        long = "dir",
        visible_alias = "site-dir",
        value_name = "DIR",
        help_heading = "Input",
        help = "Directory holding the HTML pages (defaults to ./site)."
    )]
    pub site_dir: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.sitenav/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a starter config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'b',
        long = "cb",
        visible_alias = "combine",
        value_name = "FILE",
        help_heading = "Combine",
        help = "Write all pages into one print-ready HTML file instead of rewriting them."
    )]
    pub combine: Option<String>,

    #[arg(
        long = "tt",
        visible_alias = "title",
        value_name = "TITLE",
        help_heading = "Combine",
        help = "Title of the combined document."
    )]
    pub title: Option<String>,

    #[arg(
        short = 'n',
        long = "dr",
        visible_alias = "dry-run",
        help_heading = "Rewrite",
        help = "Transform pages without writing them back."
    )]
    pub dry_run: bool,
}
