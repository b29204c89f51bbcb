use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use dotenv::dotenv;
use tracing::{error, info};

use rate_converter::config::Config;
use rate_converter::observability::init_logging;
use rate_converter::{convert_file, ProviderRegistry};

#[derive(Parser)]
#[command(name = "rate_converter")]
#[command(about = "Converts a provider rates CSV into a normalized, database ready file")]
#[command(version = "0.1.0")]
#[command(after_help = "Note: The input CSV is created from the provider XLS file by saving it as CSV")]
struct Cli {
    /// Provider the input comes from: vodafone | tmobile | sprint
    provider: String,
    /// Provider CSV file to process
    infile: PathBuf,
    /// Result file (dest|prefix|rate|YYYYMMDD|change)
    outfile: PathBuf,
    /// Debug log file [env: RATE_CONVERTER_LOG_FILE] [default: convert.log]
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    let registry = ProviderRegistry::new();
    let profile = match registry.lookup(&cli.provider) {
        Ok(profile) => *profile,
        Err(e) => {
            eprintln!("{}\n", e);
            Cli::command().print_help()?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::from_env().with_log_file(cli.log_file.clone());
    let _guard = init_logging(&config)
        .with_context(|| format!("Could not open log file {}", config.log_file.display()))?;

    info!("Provider:     {}", profile.name);
    info!("Input file:   {}", cli.infile.display());
    info!("Output file:  {}", cli.outfile.display());
    info!("");
    info!("Converting CSV...");

    match convert_file(&profile, &cli.infile, &cli.outfile) {
        Ok(_) => {
            info!("Done.");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            if !config.console {
                eprintln!("Conversion failed: {}", e);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
