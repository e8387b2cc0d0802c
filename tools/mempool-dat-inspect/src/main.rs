//! mempool-dat-inspect: print the contents of a mempool.dat snapshot.

mod render;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use mempool_dat::{read_mempool_from_path, MempoolSummary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Decode a node's mempool.dat and print its header and entries
#[derive(Parser, Debug)]
#[command(name = "mempool-dat-inspect")]
#[command(about = "Print the contents of a mempool.dat snapshot")]
struct Args {
    /// Path to the mempool.dat file
    path: PathBuf,

    /// Also read the trailing fee-delta bytes after the entries
    #[arg(short, long)]
    trailing: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// List at most this many entries
    #[arg(short, long)]
    limit: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let output = run(&args)?;
    print!("{output}");
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))
}

fn run(args: &Args) -> anyhow::Result<String> {
    debug!(path = %args.path.display(), trailing = args.trailing, "inspecting snapshot");
    let mempool = read_mempool_from_path(&args.path, args.trailing)
        .with_context(|| format!("failed to decode {}", args.path.display()))?;
    let summary = MempoolSummary::from_mempool(&mempool, args.limit);

    if args.json {
        let mut json = serde_json::to_string_pretty(&summary)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render::text(&summary, mempool.map_deltas()))
    }
}
