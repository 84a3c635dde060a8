use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use insar_pairs::logging::setup_logging;
use insar_pairs::report;
use insar_pairs::search::{self, SearchOutcome, SearchRequest};
use insar_pairs::search_parameters::{search_parameters_toml, SearchParameters};
use insar_pairs::up42::{Credentials, Provider};

/// Find Sentinel-1 SLC scene pairs on a shared relative orbit for
/// ground displacement processing on UP42.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Log specification, e.g. "info" or "insar_pairs=debug"
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search both acquisition windows and list the best scene pairs
    Search {
        /// Search parameters TOML file
        #[arg(short, long)]
        parameters: PathBuf,

        /// Secrets TOML with backend_url, project_id and project_api_key.
        /// Falls back to the UP42_* environment variables.
        #[arg(short, long)]
        secrets: Option<PathBuf>,

        /// GeoJSON area of interest, overriding the one in the parameters file
        #[arg(long)]
        aoi: Option<PathBuf>,

        /// Print the results as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Directory to write the job configuration of each listed pair to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a search parameters template
    Template { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;

    match cli.command {
        Command::Search {
            parameters,
            secrets,
            aoi,
            json,
            output,
        } => run_search(parameters, secrets, aoi, json, output).await,
        Command::Template { path } => {
            let template = SearchParameters::from_template(&search_parameters_toml())?;
            template.write(&path)?;
            info!("Wrote search parameters template to {}", path.display());
            Ok(())
        }
    }
}

async fn run_search(
    parameters_path: PathBuf,
    secrets: Option<PathBuf>,
    aoi: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut parameters = SearchParameters::read(&parameters_path)?;
    if let Some(aoi) = aoi {
        parameters.aoi = aoi;
    }

    let credentials = match secrets {
        Some(path) => Credentials::read(path)?,
        None => Credentials::from_env()
            .map_err(|e| anyhow!("No secrets file given and {e}"))?,
    };
    info!("Using {:?}", credentials);

    let request = SearchRequest::from_parameters(&parameters)?;
    println!("First acquisition range:  {}", request.first);
    println!("Second acquisition range: {}", request.second);

    let provider = Provider::from_credentials(credentials);
    let outcome = search::find_pairs(&provider, &request).await?;
    let rows = report::rows_for(&outcome, &request.aoi, parameters.display_limit);
    if json {
        // The JSON array is empty then, so the warning goes to the log instead.
        if let SearchOutcome::Empty(warning) = &outcome {
            warn!("{warning}");
        }
        println!("{}", report::render_json(&rows)?);
    } else {
        print!("{}", report::render_text(&outcome, &rows)?);
    }

    if let Some(dir) = output {
        report::write_job_configs(&rows, dir)?;
    }

    Ok(())
}
