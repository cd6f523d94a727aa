use anyhow::Context;
use chrono::{Local, NaiveDate};
use console::style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::{Config, get_config_dir};
use crate::corpus::{Corpus, display_name};
use crate::embeddings::OllamaClient;
use crate::index::FlatIndex;
use crate::municipality;
use crate::planner::{TripPlan, VisitListEntry};
use crate::ranker::{self, RankError};
use crate::weather::{Coordinates, WeatherClient};
use crate::{Result, TravelError};

fn load_config(config_dir: &Path) -> Result<Config> {
    Config::load(config_dir).map_err(|e| TravelError::Config(format!("{e:#}")))
}

/// Everything a query needs, built once at startup before any ranking
#[derive(Debug)]
struct Session {
    config: Config,
    corpus: Corpus,
    location_keys: Vec<String>,
    index: FlatIndex,
    embedder: OllamaClient,
}

impl Session {
    fn start() -> Result<Self> {
        let config_dir = get_config_dir()?;
        let config = load_config(&config_dir)?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self> {
        let corpus = Corpus::load(&config.data.landmarks_dir, &config.data.municipalities_dir)
            .map_err(|e| TravelError::Corpus(format!("{e:#}")))?;
        let location_keys = corpus.location_ids();

        let embedder = OllamaClient::new(&config.ollama)
            .map_err(|e| TravelError::Embedding(format!("{e:#}")))?;
        let index = ranker::build_location_index(&corpus, &embedder)
            .map_err(|e| TravelError::Index(format!("{e:#}")))?;

        info!(
            "Session ready: {} locations indexed",
            index.len()
        );

        Ok(Self {
            config,
            corpus,
            location_keys,
            index,
            embedder,
        })
    }

    fn recommend(
        &self,
        interests: &str,
        limit: usize,
    ) -> std::result::Result<Vec<String>, RankError> {
        ranker::rank_locations(
            interests,
            &self.location_keys,
            &self.index,
            &self.embedder,
            limit,
        )
    }

    fn municipality_of(&self, location_id: &str) -> String {
        municipality::resolve(location_id, &self.corpus.municipalities)
    }

    fn default_coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.config.weather.default_latitude,
            longitude: self.config.weather.default_longitude,
        }
    }
}

/// One-shot recommendation query
#[inline]
pub fn recommend(interests: &str, limit: usize) -> Result<()> {
    let session = Session::start()?;

    match session.recommend(interests, limit) {
        Ok(ranked) => {
            println!("{}", style("🏝️ Recommended Places for You").bold());
            for (rank, location_id) in ranked.iter().enumerate() {
                println!(
                    "{}. {} - {}",
                    rank + 1,
                    style(display_name(location_id)).bold(),
                    session.municipality_of(location_id)
                );
            }
        }
        Err(e) => print_rank_error(&e),
    }

    Ok(())
}

/// Interactive planning session: search, build a visit list, enrich with
/// weather, finalize or reset.
#[inline]
pub fn plan(travel_date: Option<NaiveDate>) -> Result<()> {
    let session = Session::start()?;
    let weather = WeatherClient::new(&session.config.weather)
        .context("Failed to create weather client")?;

    let travel_date = match travel_date {
        Some(date) => date,
        None => Input::new()
            .with_prompt("📅 When are you planning to travel? (YYYY-MM-DD)")
            .default(Local::now().date_naive())
            .interact_text()
            .context("Failed to read travel date")?,
    };

    let mut trip = TripPlan::new(travel_date);

    println!("{}", style("🌴 Puerto Rico Travel Planner").bold().cyan());

    loop {
        let actions = &[
            "Search for places",
            "View visit list",
            "Finalize trip plan",
            "Reset list",
            "Quit",
        ];
        let action = Select::new()
            .with_prompt("Travel options")
            .default(0)
            .items(actions)
            .interact()
            .context("Failed to read menu selection")?;

        match action {
            0 => search_and_add(&session, &mut trip)?,
            1 => show_visit_list(&session, &weather, &mut trip),
            2 => {
                if trip.finalize() {
                    println!(
                        "{}",
                        style("Your trip plan has been finalized!").green()
                    );
                    show_final_plan(&trip);
                } else {
                    println!("You haven't added any places to your list yet.");
                }
            }
            3 => {
                if Confirm::new()
                    .with_prompt("Clear the visit list?")
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?
                {
                    trip.reset();
                    println!("Visit list cleared.");
                }
            }
            _ => break,
        }
    }

    Ok(())
}

fn search_and_add(session: &Session, trip: &mut TripPlan) -> anyhow::Result<()> {
    let interests: String = Input::new()
        .with_prompt("📝 What kind of places would you like to visit?")
        .interact_text()?;

    let ranked = match session.recommend(&interests, ranker::DEFAULT_RESULT_LIMIT) {
        Ok(ranked) => ranked,
        Err(e) => {
            print_rank_error(&e);
            return Ok(());
        }
    };

    println!("{}", style("🏝️ Recommended Places for You").bold());
    let labels: Vec<String> = ranked
        .iter()
        .map(|id| format!("{} - {}", display_name(id), session.municipality_of(id)))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Add places to your visit list (space to toggle)")
        .items(&labels)
        .interact()?;

    for position in picked {
        let location_id = &ranked[position];
        let entry = VisitListEntry {
            location_id: location_id.clone(),
            municipality: session.municipality_of(location_id),
            weather: None,
        };
        if trip.add(entry) {
            println!(
                "{}",
                style(format!(
                    "{} added to your visit list!",
                    display_name(location_id)
                ))
                .green()
            );
        }
    }

    Ok(())
}

fn show_visit_list(session: &Session, weather: &WeatherClient, trip: &mut TripPlan) {
    println!("{}", style("🗺️ Your Visit List").bold());
    if trip.is_empty() {
        println!("You haven't added any places to your list yet.");
        return;
    }

    // Coordinates per location are not in the corpus yet, so every lookup
    // falls back to the configured default point.
    let coords = session.default_coordinates();
    let date = trip.travel_date();

    let ids: Vec<String> = trip
        .visit_list()
        .iter()
        .map(|entry| entry.location_id.clone())
        .collect();
    for location_id in ids {
        let snapshot = weather.forecast(date, coords);
        trip.set_weather(&location_id, snapshot);
    }

    for entry in trip.visit_list() {
        println!(
            "✅ {} ({}) - {}",
            style(display_name(&entry.location_id)).bold(),
            entry.municipality,
            entry.weather.as_deref().unwrap_or("Weather data not available.")
        );
    }
}

fn show_final_plan(trip: &TripPlan) {
    println!("{}", style("📍 Finalized Travel Plan").bold());
    for entry in trip.visit_list() {
        println!(
            "📍 {} - {}",
            style(display_name(&entry.location_id)).bold(),
            entry.municipality
        );
    }
}

fn print_rank_error(error: &RankError) {
    match error {
        RankError::EmptyIndex => {
            warn!("Ranking attempted with an empty index");
            println!(
                "⚠️ No data available. Make sure landmarks and municipalities are loaded."
            );
        }
        RankError::NoMatch => {
            println!("No locations found for your interests. Try different keywords.");
        }
        other => {
            error!("Ranking failed: {:#}", other);
            println!("Recommendation failed: {other}");
        }
    }
}

/// Show corpus, embedding server, and weather configuration health
#[inline]
pub fn show_status() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config = Config::load(&config_dir).unwrap_or_default();

    println!("📊 Travel Planner Status");
    println!("{}", "=".repeat(50));
    println!();

    println!("📚 Corpus Status:");
    match Corpus::load(&config.data.landmarks_dir, &config.data.municipalities_dir) {
        Ok(corpus) => {
            println!("   ✅ Landmarks: {}", corpus.landmarks.len());
            println!("   ✅ Municipalities: {}", corpus.municipalities.len());
            if corpus.is_empty() {
                println!("   ⚠️  Corpus is empty; recommendations will return no data");
            }
        }
        Err(e) => {
            println!("   ❌ Corpus: Failed to load - {e:#}");
        }
    }

    println!("🤖 Embedding Server Status:");
    match OllamaClient::new(&config.ollama) {
        Ok(client) => match client.health_check() {
            Ok(()) => {
                println!(
                    "   ✅ Ollama: Connected ({}:{})",
                    config.ollama.host, config.ollama.port
                );
                println!("   📋 Model: {}", config.ollama.model);
                println!("   🔢 Dimension: {}", config.ollama.embedding_dimension);
            }
            Err(e) => {
                println!("   ⚠️  Ollama: Connected but unhealthy - {e:#}");
            }
        },
        Err(e) => {
            println!("   ❌ Ollama: Failed to connect - {e:#}");
        }
    }

    println!("🌦️  Weather Status:");
    if config.weather.api_key.is_empty() {
        println!("   ⚠️  API key not configured; weather lookups will fail");
    } else {
        println!("   ✅ API key configured");
    }
    println!(
        "   📍 Default coordinates: {}, {}",
        config.weather.default_latitude, config.weather.default_longitude
    );

    println!();
    println!("💡 Next Steps:");
    println!("   • Use 'travel-planner recommend <interests>' for a one-shot query");
    println!("   • Use 'travel-planner plan' to build an itinerary interactively");
    println!("   • Use 'travel-planner config' to update settings");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataConfig, OllamaConfig};
    use tempfile::TempDir;

    #[test]
    fn malformed_config_file_yields_config_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("config.toml"), "not valid toml [[[")
            .expect("Failed to write config");

        let err = load_config(dir.path()).expect_err("load must fail");
        assert!(matches!(err, TravelError::Config(_)));
    }

    #[test]
    fn unreadable_corpus_directory_yields_corpus_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let file = dir.path().join("landmarks");
        std::fs::write(&file, "a file where a directory should be")
            .expect("Failed to write file");

        let config = Config {
            data: DataConfig {
                landmarks_dir: file.clone(),
                municipalities_dir: file,
            },
            ..Config::default()
        };

        let err = Session::from_config(config).expect_err("session must fail");
        assert!(matches!(err, TravelError::Corpus(_)));
    }

    #[test]
    fn invalid_embedding_endpoint_yields_embedding_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // Empty corpus directories so startup reaches the embedding client.
        let config = Config {
            data: DataConfig {
                landmarks_dir: dir.path().join("landmarks"),
                municipalities_dir: dir.path().join("municipalities"),
            },
            ollama: OllamaConfig {
                host: "bad host".to_string(),
                ..OllamaConfig::default()
            },
            ..Config::default()
        };

        let err = Session::from_config(config).expect_err("session must fail");
        assert!(matches!(err, TravelError::Embedding(_)));
    }
}
