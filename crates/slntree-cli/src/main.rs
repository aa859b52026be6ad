use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use slntree::{FileConfig, RenderArgs, SlntreeOptions, build_report, write_report};
use slntree_render::RenderOutcome;

/// Exit code when `--root` matches no solution.
const EXIT_NO_ROOT: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "slntree",
    about = "slntree: solution → project → assembly dependency trees",
    version
)]
pub struct Cli {
    /// Snapshot to read: a directory of CSV files or a .json file
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    input: PathBuf,

    /// TOML file with default settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<ExitCode> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let opts = SlntreeOptions {
        input: args.input,
        output: args.output,
        render: args.render.resolve(&config),
        revision: args.render.resolve_revision(&config),
    };

    let code = match build_report(&opts)? {
        RenderOutcome::Rendered(report) => {
            write_report(&report, opts.output.as_deref())?;
            ExitCode::SUCCESS
        }
        outcome @ RenderOutcome::NothingToRender => {
            eprintln!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        outcome @ RenderOutcome::NoRootMatched { .. } => {
            eprintln!("Error: {}", outcome.message());
            ExitCode::from(EXIT_NO_ROOT)
        }
    };

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(code)
}

pub fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    run(args)
}
