use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use ossaudit::{
    config::{iq_server_config_path, oss_index_config_path, Configuration, IqServerConfig},
    error::AuditError,
    exclusion::{exclude_all, load_ignore_file, DEFAULT_IGNORE_FILE},
    input::{load_coordinate_list, load_coordinates},
    model::{AuditReport, AuditRequest, MAX_COORDINATES_PER_REQUEST},
    output::{format_result_to_string, print_result, OutputFormat},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const VULNERABLE: u8 = 3;
}

#[derive(Parser)]
#[command(name = "ossaudit")]
#[command(
    author,
    version,
    about = "Audit package coordinates against saved vulnerability lookups"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ignore any cached lookup results
    #[arg(long, global = true)]
    clean_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply exclusions to lookup results and report live vulnerabilities
    Audit {
        /// JSON file with component reports from the lookup service
        input: PathBuf,

        /// CVE or vulnerability ID to exclude (repeatable)
        #[arg(short, long = "exclude-vulnerability")]
        exclude: Vec<String>,

        /// Ignore file with one exclusion per line
        #[arg(long)]
        exclude_file: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write output to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only show live vulnerabilities and the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the request payloads for a list of coordinates
    Request {
        /// File with one package coordinate per line
        input: PathBuf,

        /// Maximum coordinates per request
        #[arg(long, default_value_t = MAX_COORDINATES_PER_REQUEST)]
        batch_size: usize,
    },

    /// Show config file locations and loaded settings
    Config {
        /// Only print config file paths
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{}", render_error(&e));
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

/// Rate limiting is shown as its instructions; anything else with its cause chain.
fn render_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<AuditError>() {
        Some(err @ AuditError::RateLimited) => err.to_string(),
        _ => format!("Error: {:#}", e),
    }
}

fn exit_code(report: &AuditReport) -> u8 {
    if report.is_vulnerable() {
        exit_codes::VULNERABLE
    } else {
        exit_codes::SUCCESS
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    let config =
        Configuration::load(env!("CARGO_PKG_VERSION"))?.with_clean_cache(cli.clean_cache);
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Audit {
            input,
            exclude,
            exclude_file,
            format,
            output,
            quiet,
        } => run_audit(&input, exclude, exclude_file, &format, output, quiet),
        Commands::Request { input, batch_size } => {
            print_requests(&input, batch_size)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { path } => {
            handle_config(&config, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_audit(
    input: &Path,
    mut exclusions: Vec<String>,
    exclude_file: Option<PathBuf>,
    format: &str,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<u8> {
    let format = OutputFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))?;

    let today = Local::now().date_naive();
    match exclude_file {
        Some(path) => exclusions.extend(load_ignore_file(&path, today)?),
        None => {
            let default = Path::new(DEFAULT_IGNORE_FILE);
            if default.exists() {
                exclusions.extend(load_ignore_file(default, today)?);
            }
        }
    }

    let mut coordinates = load_coordinates(input)?;
    let excluded = exclude_all(&mut coordinates, &exclusions);
    tracing::info!(
        coordinates = coordinates.len(),
        exclusions = exclusions.len(),
        excluded,
        "audit complete"
    );

    let report = AuditReport::new(coordinates);

    if let Some(path) = output_file {
        std::fs::write(&path, format_result_to_string(&report, format)?)?;
        if format == OutputFormat::Table {
            println!("Results written to: {}", path.display());
        }
    } else {
        print_result(&report, format, quiet)?;
    }

    Ok(exit_code(&report))
}

fn print_requests(input: &Path, batch_size: usize) -> Result<()> {
    let coordinates = load_coordinate_list(input)?;
    for request in AuditRequest::batches(&coordinates, batch_size) {
        println!("{}", serde_json::to_string(&request)?);
    }
    Ok(())
}

fn handle_config(config: &Configuration, show_path: bool) -> Result<()> {
    let oss_path = oss_index_config_path();
    let iq_path = iq_server_config_path();

    if show_path {
        println!("{}", oss_path.display());
        println!("{}", iq_path.display());
        return Ok(());
    }

    println!("OSS Index config: {}", oss_path.display());
    match (&config.username, config.has_credentials()) {
        (Some(username), true) => println!("  username: {}", username),
        _ => {
            println!("  no credentials configured");
            println!("  Add 'username' and 'token' to this file to avoid rate limiting.");
        }
    }

    let iq = IqServerConfig::load()?;
    println!();
    println!("IQ server config: {}", iq_path.display());
    if iq.server.is_empty() {
        println!("  not configured");
    } else {
        println!("  server: {}", iq.server);
        println!("  username: {}", iq.username);
    }

    if config.clean_cache {
        println!();
        println!("Cached lookup results will be ignored.");
    }

    Ok(())
}
