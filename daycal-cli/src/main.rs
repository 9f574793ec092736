mod commands;
mod dates;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daycal_core::config::DaycalConfig;

#[derive(Parser)]
#[command(name = "daycal")]
#[command(about = "Read and edit the plain-text day files of your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show events, grouped by day
    List {
        /// First day to show (YYYY-MM-DD, today, tomorrow, yesterday)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Number of days to show
        #[arg(long, default_value_t = 1)]
        days: u32,
    },
    /// Add an event
    Add {
        title: String,

        #[arg(short, long, default_value = "today")]
        date: String,

        /// Start time (HH:MM)
        #[arg(short, long, required_unless_present = "all_day", conflicts_with = "all_day")]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long, requires = "start")]
        end: Option<String>,

        #[arg(long)]
        all_day: bool,

        /// Category label, can be repeated
        #[arg(short, long = "category")]
        categories: Vec<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event by its number in `daycal list`
    Delete {
        index: usize,

        #[arg(short, long, default_value = "today")]
        date: String,
    },
    /// Change the time of an event by its number in `daycal list`
    Move {
        index: usize,

        #[arg(short, long, default_value = "today")]
        date: String,

        /// New start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// New end time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Decode a day file line and show how it is written back
    Parse { line: String },
    /// Show configuration and data locations
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config();

    match cli.command {
        Commands::List { date, days } => {
            let from = dates::parse_date(&date)?;
            commands::list::run(&config, from, days)
        }
        Commands::Add {
            title,
            date,
            start,
            end,
            all_day: _,
            categories,
            description,
        } => {
            let date = dates::parse_date(&date)?;
            commands::add::run(
                &config,
                commands::add::NewEvent {
                    date,
                    title,
                    start,
                    end,
                    categories,
                    description,
                },
            )
        }
        Commands::Delete { index, date } => {
            let date = dates::parse_date(&date)?;
            commands::delete::run(&config, date, index)
        }
        Commands::Move {
            index,
            date,
            start,
            end,
        } => {
            let date = dates::parse_date(&date)?;
            commands::reschedule::run(&config, date, index, &start, end.as_deref())
        }
        Commands::Parse { line } => commands::parse::run(&line),
        Commands::Config => commands::config::run(&config),
    }
}

/// A broken or unreachable config file should not keep you from your events.
fn load_config() -> DaycalConfig {
    DaycalConfig::load().unwrap_or_else(|e| {
        log::warn!("{}, using default configuration", e);
        DaycalConfig::default()
    })
}
