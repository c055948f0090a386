mod catalog;
mod config;
mod inputs;
mod pass;
mod predict;
mod report;
mod web;

use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;

use crate::config::{parse_window, Config};
use crate::inputs::Inputs;
use crate::predict::{fetch_tle_files, Window};
use crate::report::Format;

const DEFAULT_CONFIG: &str = "pass-o-mat.yaml";

#[derive(Parser)]
#[command(name = "pass-o-mat")]
#[command(about = "Find overhead, sunlit satellite passes receivable by web SDR stations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArg {
    /// Configuration file (defaults apply when omitted and pass-o-mat.yaml is absent)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict and print the qualified passes
    Predict {
        #[command(flatten)]
        config: ConfigArg,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Look-ahead window, e.g. 8h or 1day
        #[arg(short, long, value_parser = parse_window)]
        window: Option<std::time::Duration>,
    },
    /// List satellite/station pairs with matching frequencies
    Pairs {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Download the configured TLE lists
    Fetch {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Serve the HTTP API
    Serve {
        #[command(flatten)]
        config: ConfigArg,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            config,
            format,
            window,
        } => predict(&config, format, window),
        Commands::Pairs { config } => pairs(&config),
        Commands::Fetch { config } => fetch(&config).await,
        Commands::Serve { config } => serve(&config).await,
    }
}

fn load_config(arg: &ConfigArg) -> Option<Config> {
    let path = match &arg.config {
        Some(path) => path.as_str(),
        None if Path::new(DEFAULT_CONFIG).exists() => DEFAULT_CONFIG,
        None => {
            log::info!("No {} found, using defaults", DEFAULT_CONFIG);
            return Some(Config::default());
        }
    };

    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn load_inputs(config: &Config) -> Option<Inputs> {
    match Inputs::load(config) {
        Ok(inputs) => Some(inputs),
        Err(e) => {
            eprintln!("Error loading catalogs: {}", e);
            None
        }
    }
}

fn predict(arg: &ConfigArg, format: Format, window: Option<std::time::Duration>) -> ExitCode {
    let Some(mut config) = load_config(arg) else {
        return ExitCode::FAILURE;
    };
    if let Some(window) = window {
        config.window = window;
    }
    let length = match config.window_duration() {
        Ok(length) => length,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let window = match Window::starting_now(length) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(inputs) = load_inputs(&config) else {
        return ExitCode::FAILURE;
    };

    let passes = inputs.passes(&config, &window, config.min_elevation_deg);

    print!("{}", report::render(&passes, format, config.utc_offset));
    if format == Format::Json {
        println!();
    }
    ExitCode::SUCCESS
}

fn pairs(arg: &ConfigArg) -> ExitCode {
    let Some(config) = load_config(arg) else {
        return ExitCode::FAILURE;
    };
    let Some(inputs) = load_inputs(&config) else {
        return ExitCode::FAILURE;
    };

    let pairs = inputs.pairs();
    for pair in &pairs {
        println!(
            "{} ({} MHz) -> {} [{}]",
            pair.satellite.name, pair.satellite.frequency_mhz, pair.station.name, pair.station.url
        );
    }
    println!(
        "{} pairs, {} element sets loaded",
        pairs.len(),
        inputs.tles.len()
    );
    ExitCode::SUCCESS
}

async fn fetch(arg: &ConfigArg) -> ExitCode {
    let Some(config) = load_config(arg) else {
        return ExitCode::FAILURE;
    };

    match fetch_tle_files(&config.tle.urls, &config.tle.folder).await {
        Ok(files) => {
            println!("Fetched {} TLE files into {}", files.len(), config.tle.folder.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fetch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(arg: &ConfigArg) -> ExitCode {
    let Some(config) = load_config(arg) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_window_argument() {
        let cli = Cli::try_parse_from(["pass-o-mat", "predict", "--window", "12h"]).unwrap();
        match cli.command {
            Commands::Predict { window, .. } => {
                assert_eq!(window, Some(std::time::Duration::from_secs(12 * 3600)))
            }
            _ => panic!("expected predict"),
        }

        for bad in ["0s", "31days", "1000000years"] {
            assert!(
                Cli::try_parse_from(["pass-o-mat", "predict", "--window", bad]).is_err(),
                "{bad}"
            );
        }
    }
}
