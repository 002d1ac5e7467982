use anyhow::Result;
use clap::Parser;
use goldprep::validator::GOLDSTANDARD_CSV;
use goldprep::{logging, run_validation, ValidationOutcome, ValidatorConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "validate-ner")]
#[command(about = "Check NER gold-standard rows against the sentence-per-line text")]
#[command(version)]
struct Args {
    /// Directory holding the CSV and, somewhere below it, the text folder
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Name of the annotation CSV inside --dir
    #[arg(long, default_value = GOLDSTANDARD_CSV)]
    csv: String,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

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

    let config = ValidatorConfig {
        csv_file_name: args.csv,
        ..ValidatorConfig::default()
    };

    match run_validation(&args.dir, &config).await? {
        ValidationOutcome::Checked { sentence_file, report } => {
            info!("Validated against {}", sentence_file.display());
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.render());
            }
        }
        outcome => println!("{outcome}"),
    }

    Ok(())
}
