
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};

use super::{Config, ConfigError, OllamaConfig, WeatherConfig, get_config_dir};
use crate::embeddings::OllamaClient;

#[inline]
pub fn run_interactive_config() -> Result<()> {
    eprintln!("{}", style("🌴 Travel Planner Configuration").bold().cyan());
    eprintln!();

    let mut config = load_existing_config()?;

    eprintln!("{}", style("Embedding Server").bold().yellow());
    eprintln!("Configure your local Ollama instance for embedding generation.");
    eprintln!();
    configure_ollama(&mut config.ollama)?;

    eprintln!();
    eprintln!("{}", style("Weather").bold().yellow());
    eprintln!("Configure the OpenWeather API used to enrich your visit list.");
    eprintln!();
    configure_weather(&mut config.weather)?;

    eprintln!();
    eprintln!("{}", style("Testing configuration...").yellow());

    if test_ollama_connection(&config.ollama) {
        eprintln!("{}", style("✓ Ollama connection successful!").green());
    } else {
        eprintln!(
            "{}",
            style("⚠ Warning: Could not connect to Ollama").yellow()
        );
        eprintln!("You can continue, but recommendations need a running embedding server.");
    }

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_file_path().display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Corpus Settings:").bold().yellow());
    eprintln!(
        "  Landmarks: {}",
        style(config.data.landmarks_dir.display()).cyan()
    );
    eprintln!(
        "  Municipalities: {}",
        style(config.data.municipalities_dir.display()).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Embedding Settings:").bold().yellow());
    eprintln!("  Host: {}", style(&config.ollama.host).cyan());
    eprintln!("  Port: {}", style(config.ollama.port).cyan());
    eprintln!("  Model: {}", style(&config.ollama.model).cyan());
    eprintln!("  Batch Size: {}", style(config.ollama.batch_size).cyan());
    eprintln!(
        "  Dimension: {}",
        style(config.ollama.embedding_dimension).cyan()
    );
    match config.ollama.ollama_url() {
        Ok(url) => eprintln!("  Ollama URL: {}", style(url).cyan()),
        Err(e) => eprintln!("  Ollama URL: {} ({})", style("Invalid").red(), e),
    }

    eprintln!();
    eprintln!("{}", style("Weather Settings:").bold().yellow());
    eprintln!(
        "  API Key: {}",
        style(mask_api_key(&config.weather.api_key)).cyan()
    );
    eprintln!("  Units: {}", style(&config.weather.units).cyan());
    eprintln!(
        "  Default Coordinates: {}, {}",
        style(config.weather.default_latitude).cyan(),
        style(config.weather.default_longitude).cyan()
    );

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

fn load_existing_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    Config::load(&config_dir).map_or_else(
        |_| {
            eprintln!(
                "{}",
                style("No existing configuration found. Using defaults.").yellow()
            );
            Ok(Config {
                base_dir: config_dir,
                ..Config::default()
            })
        },
        |config| {
            eprintln!("{}", style("Found existing configuration.").green());
            Ok(config)
        },
    )
}

fn configure_ollama(ollama: &mut OllamaConfig) -> Result<()> {
    let protocols = &["http", "https"];
    let default_index = protocols
        .iter()
        .position(|&p| p == ollama.protocol)
        .unwrap_or(0);

    let protocol_index = Select::new()
        .with_prompt("Ollama protocol")
        .default(default_index)
        .items(protocols)
        .interact()?;
    ollama.protocol = protocols[protocol_index].to_string();

    ollama.host = Input::new()
        .with_prompt("Ollama host")
        .default(ollama.host.clone())
        .interact_text()?;

    ollama.port = Input::new()
        .with_prompt("Ollama port")
        .default(ollama.port)
        .validate_with(|port: &u16| -> Result<(), ConfigError> {
            if *port == 0 {
                Err(ConfigError::InvalidPort(*port))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    ollama.model = Input::new()
        .with_prompt("Embedding model (must produce 384-dim vectors)")
        .default(ollama.model.clone())
        .validate_with(|model: &String| -> Result<(), ConfigError> {
            if model.trim().is_empty() {
                Err(ConfigError::InvalidModel(model.clone()))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(())
}

fn configure_weather(weather: &mut WeatherConfig) -> Result<()> {
    weather.api_key = Input::new()
        .with_prompt("OpenWeather API key")
        .default(weather.api_key.clone())
        .allow_empty(true)
        .interact_text()?;

    let unit_options = &["metric", "imperial", "standard"];
    let default_index = unit_options
        .iter()
        .position(|&u| u == weather.units)
        .unwrap_or(0);

    let unit_index = Select::new()
        .with_prompt("Temperature units")
        .default(default_index)
        .items(unit_options)
        .interact()?;
    weather.units = unit_options[unit_index].to_string();

    Ok(())
}

fn test_ollama_connection(ollama: &OllamaConfig) -> bool {
    OllamaClient::new(ollama).is_ok_and(|client| client.ping().is_ok())
}

/// Show only the tail of the key so a shared terminal doesn't leak it
fn mask_api_key(api_key: &str) -> String {
    if api_key.is_empty() {
        return "(not set)".to_string();
    }
    if api_key.chars().count() <= 4 {
        return "****".to_string();
    }
    let tail: String = api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}
