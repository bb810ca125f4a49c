// ABOUTME: Pierre planner CLI - manage the workout calendar and chat with the planner from a terminal
// ABOUTME: Subcommands for bootstrap, viewing, statistics, generation, undo and an interactive chat loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Populate four weeks of default workouts
//! pierre-planner init
//!
//! # Show today's workout, or a specific date
//! pierre-planner show
//! pierre-planner show 2025-03-07
//!
//! # Show the week containing a date
//! pierre-planner week --start 2025-03-03
//!
//! # Generate a 45 minute upper body workout and save it for tomorrow
//! pierre-planner generate --minutes 45 --focus "upper body" --equipment gym --save --date 2025-03-08
//!
//! # Chat with the planner
//! pierre-planner chat
//! ```

mod commands;
mod helpers;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pierre_workout_planner::{
    config::{PlannerConfig, StorageBackend},
    logging::LoggingConfig,
    planner::WorkoutPlanner,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pierre-planner",
    about = "Pierre Workout Planner CLI",
    long_about = "Plan, view and edit your workout calendar, or talk to the planner in a chat loop."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override for the file store
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    memory: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Populate the default four-week schedule if it is empty
    Init,

    /// Show the workout on a date (defaults to today)
    Show {
        /// Date as YYYY-MM-DD
        date: Option<NaiveDate>,
    },

    /// Show the seven days of the week containing a date
    Week {
        /// Any date in the week (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Show schedule statistics
    Stats {
        /// First date to include
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date to include
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Generate a workout
    Generate {
        /// Duration in minutes
        #[arg(long)]
        minutes: Option<u32>,

        /// Focus such as "upper body", "legs" or "cardio"
        #[arg(long, default_value = "full body")]
        focus: String,

        /// Equipment profile: gym, home, minimal or bodyweight
        #[arg(long)]
        equipment: Option<String>,

        /// Experience level: beginner, intermediate or advanced
        #[arg(long)]
        level: Option<String>,

        /// Date the workout is for (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Save the workout to the schedule
        #[arg(long)]
        save: bool,
    },

    /// Revert the most recent schedule change
    Undo,

    /// Interactive chat with the planner
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = PlannerConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if cli.memory {
        config.storage = StorageBackend::Memory;
    }

    let planner = WorkoutPlanner::from_config(config).await?;
    let today: NaiveDate = Local::now().date_naive();

    match cli.command {
        Command::Init => commands::schedule::init(&planner, today).await?,
        Command::Show { date } => commands::schedule::show(&planner, date.unwrap_or(today)).await?,
        Command::Week { start } => commands::schedule::week(&planner, start.unwrap_or(today)).await?,
        Command::Stats { start, end } => commands::schedule::stats(&planner, start, end).await?,
        Command::Generate {
            minutes,
            focus,
            equipment,
            level,
            date,
            save,
        } => {
            let options = commands::generate::GenerateOptions {
                minutes,
                focus,
                equipment,
                level,
                date: date.unwrap_or(today),
                save,
            };
            commands::generate::run(&planner, options).await?;
        }
        Command::Undo => commands::schedule::undo(&planner).await?,
        Command::Chat => commands::chat::run(&planner, today).await?,
    }

    Ok(())
}
