mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daygrid_core::config::DayGridConfig;
use daygrid_core::{EventStore, FileStorage};

#[derive(Parser)]
#[command(name = "daygrid")]
#[command(about = "Plan your days on a month grid; events are stored locally")]
struct Cli {
    /// Config file (defaults to ~/.config/daygrid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding stored events (overrides data_dir from the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid with the events of each day
    Month {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only count events whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List the events of one day, ordered by start time
    Day {
        /// Date (YYYY-MM-DD or relative, e.g. "today", "tomorrow", "next friday")
        date: String,

        /// Only show events whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event to a day
    Add {
        /// Date (YYYY-MM-DD or relative, e.g. "today", "tomorrow", "next friday")
        date: String,

        /// Event title
        title: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: String,

        /// Event description
        #[arg(short, long)]
        description: Option<String>,

        /// Event color (#rrggbb, defaults to default_color from the config)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Change an event; fields that are not given keep their value
    Edit {
        /// Date (YYYY-MM-DD or relative, e.g. "today", "tomorrow", "next friday")
        date: String,

        /// Event number as shown by `daygrid day`
        index: usize,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// New end time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,

        /// New color (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Date (YYYY-MM-DD or relative, e.g. "today", "tomorrow", "next friday")
        date: String,

        /// Event number as shown by `daygrid day`
        index: usize,
    },
    /// Browse and edit the calendar interactively
    Browse,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = DayGridConfig::load(cli.config.as_deref())?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_path()?,
    };
    log::debug!("Using data directory {}", data_dir.display());

    let mut store = EventStore::load(FileStorage::new(data_dir));

    match cli.command {
        Commands::Month {
            year,
            month,
            search,
        } => commands::month::run(store, &config, year, month, search),
        Commands::Day { date, search, json } => {
            let date = commands::parse_date(&date)?;
            commands::day::run(&store, date, search.as_deref().unwrap_or_default(), json)
        }
        Commands::Add {
            date,
            title,
            start,
            end,
            description,
            color,
        } => {
            let date = commands::parse_date(&date)?;
            let draft = commands::add::draft(&config, title, start, end, description, color);
            commands::add::run(&mut store, date, &draft)
        }
        Commands::Edit {
            date,
            index,
            title,
            start,
            end,
            description,
            color,
        } => {
            let date = commands::parse_date(&date)?;
            let changes = commands::edit::Changes {
                title,
                start,
                end,
                description,
                color,
            };
            commands::edit::run(&mut store, date, index, changes)
        }
        Commands::Delete { date, index } => {
            let date = commands::parse_date(&date)?;
            commands::delete::run(&mut store, date, index)
        }
        Commands::Browse => commands::browse::run(store, &config),
    }
}
