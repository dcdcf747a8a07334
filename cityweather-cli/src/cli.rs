use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, LookupError, Submission, WeatherSession, provider_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use std::process::ExitCode;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city and exit.
    Show {
        /// City name, e.g. "Miami" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Prompt for cities until Esc or Ctrl-C (default).
    Interactive,

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// List condition categories and their icons.
    Icons,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Show { city } => show(&city.join(" ")).await,
            Command::Interactive => interactive().await.map(|()| ExitCode::SUCCESS),
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Icons => {
                print!("{}", render::icon_table());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn session() -> anyhow::Result<WeatherSession> {
    let config = Config::load()?;
    if config.api_key.is_none() {
        tracing::debug!("no API key configured; requests will be rejected by the provider");
    }
    Ok(WeatherSession::new(provider_from_config(&config)))
}

/// 2 for input rejected before any request, 1 for a failed lookup.
fn exit_status(err: &LookupError) -> u8 {
    if err.is_validation() { 2 } else { 1 }
}

async fn show(city: &str) -> anyhow::Result<ExitCode> {
    let session = session()?;

    let state = match session.submit(city).await {
        Submission::Settled(state) => state,
        Submission::Ignored => session.state(),
    };

    if let Some(err) = state.error() {
        eprintln!("{}", render::error(err));
        return Ok(ExitCode::from(exit_status(err)));
    }

    print!("{}", render::panel(&state));
    Ok(ExitCode::SUCCESS)
}

async fn interactive() -> anyhow::Result<()> {
    let session = session()?;

    println!("{}", render::header());
    println!("{}", render::panel(&session.state()));

    let mut updates = session.subscribe();
    let loading_line = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.loading {
                eprintln!("{}", render::loading(state.query.trim()));
            }
        }
    });

    loop {
        let query = match Text::new("City:").with_placeholder("Enter city name...").prompt() {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => {
                loading_line.abort();
                return Err(err).context("Failed to read city name");
            }
        };

        if let Submission::Settled(state) = session.submit(query).await {
            println!("{}", render::panel(&state));
        }
    }

    loading_line.abort();
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    // Read the file only; environment overrides must not be persisted.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Create one for free at openweathermap.org")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key.trim().to_string());
    let path = config.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}
