//! # clinic CLI command handlers
//!
//! Each subcommand module exposes a `run_*` function returning the
//! process exit code. The binary in `main.rs` parses arguments, builds
//! the shared handles, and dispatches here.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use clinic_app::ConfirmAction;
use clinic_client::{ApiClient, ApiConfig, FileCredentialStore, SessionStore};

pub mod appointments;
pub mod patients;
pub mod session;

/// Shared wiring for every command: one HTTP adapter, one session store.
pub struct AppHandles {
    pub client: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
}

/// Build the adapter and session store from the resolved configuration
/// and the on-disk credential store.
pub fn build_handles(api_url: Option<&str>, token_file: &Path) -> anyhow::Result<AppHandles> {
    let config = match api_url {
        Some(url) => ApiConfig::new(url),
        None => ApiConfig::from_env(),
    }
    .context("resolving API configuration")?;

    let credentials = FileCredentialStore::open(token_file);
    let client =
        Arc::new(ApiClient::new(&config, credentials).context("building HTTP client")?);
    let session = Arc::new(SessionStore::new(Arc::clone(&client)));
    Ok(AppHandles { client, session })
}

/// Interactive confirmation on stdin, defaulting to "no".
pub struct PromptConfirm;

impl ConfirmAction for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Read one line from stdin after printing a prompt.
pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
