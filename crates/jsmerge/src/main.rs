use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use std::path::PathBuf;

use jsmerge::config::Config;
use jsmerge::orchestrator::BuildOrchestrator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root that sources, banner, minifier and output are resolved against
    #[arg(short, long)]
    project_dir: Option<PathBuf>,

    /// Keep the merged bundle as is instead of running the minifier
    #[arg(long)]
    no_minify: bool,

    /// Do not prepend the license banner
    #[arg(long)]
    no_banner: bool,

    /// Write artifacts to a temporary file and rename them into place
    #[arg(long)]
    atomic: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let log_level = match cli.verbose {
        0 => "warn",  // Default: warnings and errors only
        1 => "info",  // -v: created/removed files
        2 => "debug", // -vv: per-module reads and the minifier command line
        _ => "trace", // -vvv or more: minifier stderr
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    debug!(
        "Verbosity level: {} (log level: {})",
        cli.verbose, log_level
    );
    info!("Starting jsmerge");

    let mut config = Config::load(cli.config.as_deref())?;

    // Command-line flags take precedence over every config layer
    if let Some(project_dir) = cli.project_dir {
        config.project_dir = project_dir;
    }
    if cli.no_minify {
        config.minify = false;
    }
    if cli.no_banner {
        config.banner = false;
    }
    if cli.atomic {
        config.atomic_writes = true;
    }

    debug!("Configuration: {:?}", config);

    let report = BuildOrchestrator::new(config).build()?;

    let artifact = std::path::absolute(&report.artifact).unwrap_or(report.artifact);
    println!("built {}", artifact.display());

    Ok(())
}
