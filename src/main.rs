//! CLI entry point for typemove

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use typemove::{
    DEFAULT_ROOTS, RelocationMap, Relocator, SummaryConfig, print_summary, print_summary_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "typemove")]
#[command(about = "Move named type imports from storage modules into a shared types module")]
#[command(version)]
struct Args {
    /// Directories to rewrite (default: app and components)
    roots: Vec<PathBuf>,

    /// JSON relocation map to use instead of the built-in table
    #[arg(long = "map", value_name = "FILE")]
    map: Option<PathBuf>,

    /// Module that relocated types are imported from
    #[arg(long = "destination", value_name = "MODULE")]
    destination: Option<String>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Print one line per modified file
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the summary as JSON
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log every rewritten import
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_map(args: &Args) -> typemove::Result<RelocationMap> {
    let map = match &args.map {
        Some(path) => RelocationMap::from_file(path)?,
        None => RelocationMap::builtin(),
    };
    match &args.destination {
        Some(destination) => map.with_destination(destination.clone()),
        None => Ok(map),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let map = load_map(&args).unwrap_or_else(|e| {
        eprintln!("typemove: {}", e);
        process::exit(1);
    });
    if map.is_empty() {
        warn!("relocation map has no types, nothing will change");
    }
    debug!(types = map.len(), destination = %map.destination(), "loaded relocation map");

    let roots: Vec<PathBuf> = if args.roots.is_empty() {
        DEFAULT_ROOTS.iter().map(PathBuf::from).collect()
    } else {
        args.roots.clone()
    };

    let relocator = Relocator::new(map).with_dry_run(args.dry_run);
    let summary = relocator.process(&roots).unwrap_or_else(|e| {
        eprintln!("typemove: {}", e);
        process::exit(1);
    });

    let result = if args.json {
        print_summary_json(&summary)
    } else {
        print_summary(
            &summary,
            SummaryConfig {
                use_color: should_use_color(args.color),
                list_files: args.list,
            },
        )
    };

    if let Err(e) = result {
        eprintln!("typemove: error writing output: {}", e);
        process::exit(1);
    }
}
