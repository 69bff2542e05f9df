use std::process::ExitCode;

use anyhow::Context;
use citycast_core::{Config, FetchError, Settings, WeatherClient, WeatherReading};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text, error::InquireResult};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather for a city")]
pub struct Cli {
    /// Override the provider's current-weather endpoint.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up one city and exit.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Ask for cities interactively until Esc or Ctrl-C (the default).
    Prompt,

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Prompt) {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let client = WeatherClient::from_settings(&Settings::from_env(self.base_url)?);
                let outcome = client.submit(&city.join(" ")).await;
                print_outcome(&outcome);
                Ok(ExitCode::from(exit_status(&outcome)))
            }
            Command::Prompt => {
                let client = WeatherClient::from_settings(&Settings::from_env(self.base_url)?);
                prompt_loop(&client).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// One city per Enter. Each submit is awaited before the next prompt, so user
/// actions from this loop never overlap.
async fn prompt_loop(client: &WeatherClient) -> anyhow::Result<()> {
    loop {
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("City:")
                .with_help_message("Enter to search, Esc to quit")
                .prompt()
        })
        .await
        .context("City prompt task failed")?;

        let Some(input) = read_city(answer)? else {
            return Ok(());
        };

        let outcome = client.submit(&input).await;
        print_outcome(&outcome);
    }
}

/// `None` when the user left the prompt with Esc or Ctrl-C.
fn read_city(answer: InquireResult<String>) -> anyhow::Result<Option<String>> {
    match answer {
        Ok(input) => Ok(Some(input)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city from terminal"),
    }
}

fn exit_status(outcome: &Result<WeatherReading, FetchError>) -> u8 {
    if outcome.is_ok() { 0 } else { 1 }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    tracing::info!(path = %path.display(), "stored API key");
    println!("Saved API key to {}", path.display());
    Ok(())
}

/// Reading view goes to stdout, error view to stderr.
fn print_outcome(outcome: &Result<WeatherReading, FetchError>) {
    match outcome {
        Ok(reading) => println!("{reading}"),
        Err(err) => eprintln!("{err}"),
    }
}
