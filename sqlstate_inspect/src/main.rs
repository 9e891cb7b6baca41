//! # SQLSTATE inspector CLI
//!

mod commands;
mod error;

use clap::{ArgAction, Parser, Subcommand};
use error::InspectResult;
use sqlstate_errors::config::build_info;
use sqlstate_errors::{Classifier, ErrorFactory};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "sqlstate-inspect", version, about = "Inspect SQLSTATE classification")]
struct Cli {
    /// TOML file with classification overrides (defaults to $SQLSTATE_OVERRIDES_FILE)
    #[arg(long, global = true, value_name = "FILE")]
    overrides: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify one or more SQLSTATE codes
    Classify {
        #[arg(required = true, value_name = "CODE")]
        codes: Vec<String>,
    },
    /// Show the registry entry for a condition name or code
    Lookup {
        #[arg(value_name = "NAME|CODE")]
        key: String,
    },
    /// Classify a JSON diagnostic record
    Build {
        /// Input file, `-` or absent for stdin
        file: Option<PathBuf>,
    },
    /// List registry conditions
    Table {
        /// Only conditions of this two-character class
        #[arg(long, value_name = "CC")]
        class: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_classifier(overrides: Option<&PathBuf>) -> InspectResult<Classifier> {
    let classifier = match overrides {
        Some(path) => Classifier::from_file(path)?,
        None => Classifier::from_env()?,
    };
    log::debug!(
        "Using {} registry with {} overrides ({})",
        build_info::engine(),
        classifier.override_count(),
        build_info::source_info()
    );
    Ok(classifier)
}

fn run(cli: Cli) -> InspectResult<String> {
    let classifier = load_classifier(cli.overrides.as_ref())?;

    match cli.command {
        Command::Classify { codes } => commands::classify::run(&classifier, &codes, cli.json),
        Command::Lookup { key } => commands::lookup::run(&classifier, &key, cli.json),
        Command::Build { file } => {
            let input = commands::build::read_input(file.as_deref())?;
            commands::build::run(&ErrorFactory::new(classifier), &input, cli.json)
        }
        Command::Table { class } => {
            commands::table::run(&classifier, class.as_deref(), cli.json)
        }
    }
}
