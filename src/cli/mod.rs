//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod ask;
pub mod health;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use clap::{Parser, Subcommand};

use crate::api::client::HttpAnswerService;
use crate::cli::ask::run_ask;
use crate::cli::health::run_health;
use crate::cli::settings::{run_set, run_unset};
use crate::core::config::Config;
use crate::core::coordinator::RequestCoordinator;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};
use crate::utils::url::validate_backend_url;

fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{}\ncommit: {}\nrustc: {}",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
            option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
        )
    })
}

#[derive(Parser)]
#[command(name = "rentalqa", version, long_version = long_version())]
#[command(about = "A terminal chat client for the car-rental Q&A service")]
#[command(
    long_about = "rentalqa is a full-screen terminal chat for asking questions about car \
rental terms. Each question is sent to the answering service, and every answer \
fragment it returns is shown as its own message.\n\n\
Backend URL (first match wins):\n\
  --backend-url <URL>            Command-line override\n\
  rentalqa set backend-url <URL> Saved in the config file\n\
  http://localhost:8000          Built-in default\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Up/Down           Scroll by one line\n\
  PageUp/PageDown   Scroll by a page\n\
  End               Jump to the newest message\n\
  Esc, Ctrl+C       Quit the application\n\n\
Diagnostics:\n\
  RUST_LOG          Log filter (defaults to warn)\n\
  --log-file <PATH> Write logs to a file (the chat only logs to a file)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the answering service
    #[arg(short = 'b', long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Append diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answers
    Ask {
        /// Print the bot replies as JSON
        #[arg(long)]
        json: bool,
        /// The question (can be multiple words)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// Check whether the answering service is up
    Health,
    /// Set configuration values, or show them when no value is given
    Set {
        /// Configuration key to set (backend-url, greeting)
        key: Option<String>,
        /// Value to set for the key (can be multiple words for greeting)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (backend-url, greeting)
        key: String,
    },
}

impl Commands {
    fn owns_terminal(&self) -> bool {
        matches!(self, Commands::Chat)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

/// Loads the config and picks the service URL, rejecting a malformed
/// `--backend-url` before anything is sent.
fn resolve_service(args: &Args) -> Result<(Config, String), Box<dyn Error>> {
    let config = Config::load()?;
    let override_url = match args.backend_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            Some(validate_backend_url(url).map_err(|reason| format!("--backend-url: {reason}"))?)
        }
        _ => None,
    };
    let backend_url = config.resolve_backend_url(override_url.as_deref());
    Ok((config, backend_url))
}

async fn async_main(mut args: Args) -> Result<(), Box<dyn Error>> {
    let command = args.command.take().unwrap_or(Commands::Chat);
    init_tracing(&LogTarget::for_command(
        args.log_file.as_deref(),
        command.owns_terminal(),
    ))?;

    match command {
        Commands::Set { key, value } => run_set(key.as_deref(), value),
        Commands::Unset { key } => run_unset(&key),
        Commands::Chat => {
            let (config, backend_url) = resolve_service(&args)?;
            let service = Arc::new(HttpAnswerService::new(backend_url.clone()));
            let coordinator = RequestCoordinator::with_greeting(config.greeting_text());
            run_chat(service, coordinator, backend_url).await
        }
        Commands::Ask { json, question } => {
            let (_, backend_url) = resolve_service(&args)?;
            let service = HttpAnswerService::new(backend_url);
            run_ask(&question.join(" "), json, &service).await
        }
        Commands::Health => {
            let (_, backend_url) = resolve_service(&args)?;
            run_health(&HttpAnswerService::new(backend_url)).await
        }
    }
}
