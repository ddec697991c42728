//! # clinic CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags map onto the tracing filter.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clinic_cli::appointments::{run_appointments, AppointmentsArgs};
use clinic_cli::patients::{run_patients, PatientsArgs};
use clinic_cli::session::{run_login, run_logout, run_whoami, LoginArgs};

/// Clinic administration from the terminal: sign in, manage patient
/// records, and schedule appointments against the clinic API.
#[derive(Parser, Debug)]
#[command(name = "clinic", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base address of the clinic API. Overrides `CLINIC_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where to persist the session tokens.
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and persist the session tokens.
    Login(LoginArgs),

    /// Sign out and remove persisted tokens.
    Logout,

    /// Show the authenticated identity and its roles.
    Whoami,

    /// Patient records.
    Patients(PatientsArgs),

    /// Appointment scheduling.
    #[command(alias = "rdv")]
    Appointments(AppointmentsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let token_file = cli.token_file.clone().unwrap_or_else(default_token_file);
    tracing::debug!(token_file = %token_file.display(), "starting clinic CLI");

    let handles = match clinic_cli::build_handles(cli.api_url.as_deref(), &token_file) {
        Ok(handles) => handles,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Login(args) => run_login(args, &handles).await,
        Commands::Logout => run_logout(&handles),
        Commands::Whoami => run_whoami(&handles).await,
        Commands::Patients(args) => run_patients(args, &handles).await,
        Commands::Appointments(args) => run_appointments(args, &handles).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Default token location: `CLINIC_TOKEN_FILE`, else a dotfile in the
/// home directory, else the working directory.
fn default_token_file() -> PathBuf {
    if let Ok(path) = std::env::var("CLINIC_TOKEN_FILE") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(".clinic-credentials.json"),
        None => PathBuf::from(".clinic-credentials.json"),
    }
}
