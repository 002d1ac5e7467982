use anyhow::Result;
use clap::Parser;
use goldprep::{logging, run_split, SplitConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "split-sentences")]
#[command(about = "Split the single .txt file in a directory into one sentence per line")]
#[command(version)]
struct Args {
    /// Directory holding the input file
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose, args.json_logs);

    info!(?args, "Parsed CLI arguments");

    if !args.dir.is_dir() {
        anyhow::bail!("Not a directory: {}", args.dir.display());
    }

    let outcome = run_split(&args.dir, &SplitConfig::default()).await?;
    println!("{outcome}");

    Ok(())
}
