//! Permit bulletin CLI
//!
//! Fetches and parses PPRBD single-family permit reports.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use permits::{
    error::Result,
    models::{CollectRequest, Config},
    pipeline::{self, export},
    utils::decode_report_bytes,
};

/// Fetch and parse PPRBD Single-Family permit reports.
#[derive(Parser, Debug)]
#[command(name = "permits", version, about)]
struct Cli {
    /// One or more report files to parse (weekly or weekday text reports)
    #[arg(long, num_args = 1.., value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Read report content from STDIN
    #[arg(long)]
    stdin: bool,

    /// Download the latest reports directly from pprbd.org
    #[arg(long)]
    fetch: bool,

    /// Limit results to permits issued in the last N days (default: 30)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,

    /// Print the resulting CSV to STDOUT
    #[arg(long = "print")]
    print_csv: bool,

    /// Print the resulting rows as JSON to STDOUT
    #[arg(long)]
    json: bool,

    /// Write the CSV output to a file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Project code to filter on (default: 101)
    #[arg(long)]
    project_code: Option<String>,

    /// Return only permits where the contractor appears to be the homeowner
    #[arg(long, overrides_with = "no_homeowner_only")]
    homeowner_only: bool,

    /// Keep every contractor, even if the config enables the homeowner filter
    #[arg(long, overrides_with = "homeowner_only")]
    no_homeowner_only: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Homeowner filter: the last command-line switch wins over the config.
    fn resolve_homeowner_only(&self, config: &Config) -> bool {
        if self.homeowner_only {
            true
        } else if self.no_homeowner_only {
            false
        } else {
            config.filter.homeowner_only
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Build the collection request from flags over config defaults.
fn build_request(cli: &Cli, config: &Config) -> Result<CollectRequest> {
    let mut request = CollectRequest::from_filter(&config.filter)
        .with_files(cli.files.iter().cloned())
        .with_fetch(cli.fetch)
        .with_homeowner_only(cli.resolve_homeowner_only(config));

    if let Some(days) = cli.days {
        request = request.with_days(days);
    }
    if let Some(code) = &cli.project_code {
        request = request.with_project_code(code.trim());
    }
    if cli.stdin {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        request = request.with_text(decode_report_bytes(&bytes));
    }

    Ok(request)
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None => Config::default(),
    };
    config.validate()?;

    let request = build_request(&cli, &config)?;
    let outcome = pipeline::collect(&request, &config)?;

    log::info!("{}", outcome.message());

    let mut stdout = io::stdout().lock();
    if cli.print_csv {
        export::write_csv(&outcome.rows, &mut stdout)?;
    }
    if cli.json {
        writeln!(stdout, "{}", export::to_json(&outcome.rows)?)?;
    }
    if let Some(path) = &cli.export {
        export::export_csv_file(&outcome.rows, path)?;
    }

    Ok(())
}

/// Main entry point for the CLI application.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn owner_config() -> Config {
        let mut config = Config::default();
        config.filter.homeowner_only = true;
        config
    }

    #[test]
    fn test_homeowner_from_config() {
        let cli = Cli::parse_from(["permits", "--files", "a.txt"]);
        assert!(build_request(&cli, &owner_config()).unwrap().homeowner_only);
        assert!(!build_request(&cli, &Config::default()).unwrap().homeowner_only);
    }

    #[test]
    fn test_flag_disables_configured_homeowner_filter() {
        let cli = Cli::parse_from(["permits", "--no-homeowner-only"]);
        assert!(!build_request(&cli, &owner_config()).unwrap().homeowner_only);
    }

    #[test]
    fn test_last_homeowner_flag_wins() {
        let cli = Cli::parse_from(["permits", "--no-homeowner-only", "--homeowner-only"]);
        assert!(build_request(&cli, &Config::default()).unwrap().homeowner_only);

        let cli = Cli::parse_from(["permits", "--homeowner-only", "--no-homeowner-only"]);
        assert!(!build_request(&cli, &owner_config()).unwrap().homeowner_only);
    }

    #[test]
    fn test_flags_override_config_filters() {
        let cli = Cli::parse_from(["permits", "--days", "7", "--project-code", " 102 "]);
        let request = build_request(&cli, &Config::default()).unwrap();
        assert_eq!(request.days, 7);
        assert_eq!(request.project_code, "102");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "permits".to_string(),
            "--config".to_string(),
            tmp.path().join("absent.toml").display().to_string(),
        ]);
        let err = run(cli).unwrap_err();
        assert!(matches!(err, permits::AppError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_malformed_config_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("permits.toml");
        std::fs::write(&path, "[filter\ndays = ").unwrap();
        let cli = Cli::parse_from([
            "permits".to_string(),
            "--config".to_string(),
            path.display().to_string(),
        ]);
        assert!(matches!(run(cli).unwrap_err(), permits::AppError::Toml(_)));
    }
}
