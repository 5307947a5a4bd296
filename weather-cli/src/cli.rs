use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_panel_core::render::{self, SEARCH_PLACEHOLDER};
use weather_panel_core::{Config, WeatherPanel, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup")]
pub struct Cli {
    /// OpenWeather API key. Takes precedence over the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Search cities interactively. Esc or Ctrl-C quits.
    Interactive,

    /// Show weather for one city and exit.
    Show {
        /// City name; the configured default city if absent.
        city: Option<String>,

        /// Print the raw weather record as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Interactive => {
                let panel = build_panel(self.api_key)?;
                interactive(&panel).await
            }
            Command::Show { city, json } => {
                let panel = build_panel(self.api_key)?;
                show(&panel, city, json).await
            }
        }
    }
}

fn build_panel(api_key: Option<String>) -> Result<WeatherPanel> {
    let config = Config::load()?.with_api_key_override(api_key);
    tracing::debug!(
        default_city = config.default_city(),
        base_url = config.base_url(),
        has_api_key = config.api_key().is_some(),
        "loaded configuration"
    );
    Ok(WeatherPanel::new(
        provider_from_config(&config),
        config.default_city(),
    ))
}

fn print_view(panel: &WeatherPanel) {
    let today = Local::now().date_naive();
    println!("{}\n", render::render(&panel.view(), today));
}

async fn interactive(panel: &WeatherPanel) -> Result<()> {
    if let Some(pending) = panel.activate() {
        print_view(panel);
        pending.await;
    }

    loop {
        print_view(panel);

        let query = match Text::new("City:")
            .with_placeholder(SEARCH_PLACEHOLDER)
            .prompt()
        {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        };

        panel.set_query(query);
        if let Some(pending) = panel.handle_search() {
            print_view(panel);
            pending.await;
        }
    }

    Ok(())
}

async fn show(panel: &WeatherPanel, city: Option<String>, json: bool) -> Result<()> {
    match city {
        Some(city) => {
            panel.set_query(city);
            if let Some(pending) = panel.handle_search() {
                pending.await;
            }
        }
        None => {
            if let Some(pending) = panel.activate() {
                pending.await;
            }
        }
    }

    if json {
        let record = panel.state().weather;
        let text =
            serde_json::to_string_pretty(&record).context("Failed to serialize weather record")?;
        println!("{text}");
    } else {
        print_view(panel);
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;
    let current_city = config.default_city().to_string();

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&current_city)
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    let default_city = default_city.trim();
    if !default_city.is_empty() {
        config.default_city = Some(default_city.to_string());
    }
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_city_and_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--json"]).expect("parses");
        match cli.command {
            Some(Command::Show { city, json }) => {
                assert_eq!(city.as_deref(), Some("Paris"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn api_key_flag_is_global() {
        let cli = Cli::try_parse_from(["weather", "show", "--api-key", "KEY"]).expect("parses");
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
    }
}
