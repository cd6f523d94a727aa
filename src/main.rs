use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use travel_planner::Result;
use travel_planner::commands::{plan, recommend, show_status};
use travel_planner::config::{run_interactive_config, show_config};

#[derive(Parser)]
#[command(name = "travel-planner")]
#[command(about = "Recommends Puerto Rico destinations from your interests via semantic search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure embedding server and weather settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Recommend locations for a free-text statement of interests
    Recommend {
        /// What kind of places you would like to visit
        interests: String,
        /// Maximum number of recommendations
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Start an interactive trip-planning session
    Plan {
        /// Travel date (YYYY-MM-DD); prompted interactively when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show corpus, embedding server, and weather status
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Recommend { interests, limit } => {
            recommend(&interests, limit)?;
        }
        Commands::Plan { date } => {
            plan(date)?;
        }
        Commands::Status => {
            show_status()?;
        }
    }

    Ok(())
}
