//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flowday - client for the Flow daily planning service
#[derive(Parser)]
#[command(
    name = "fd",
    about = "Flow planning client: today's plan, completions, skips, and coaching",
    version,
    after_help = "Logs are written to: ~/.local/share/flowday/logs/flowday.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Plan date to operate on (defaults to today)
    #[arg(short, long, global = true, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Subcommand to execute (defaults to `today`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Show the plan for the day, grouped into now / ready / later
    Today,

    /// Mark a plan item done
    Complete {
        /// Id of the plan item
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,
    },

    /// Skip a plan item and ask the coach for a smaller next move
    Skip {
        /// Id of the plan item
        #[arg(value_name = "ITEM_ID")]
        item_id: i64,

        /// Why the item is being skipped
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Show the goal/system/habit/task relationship map
    Map,

    /// List the habit and task library
    Library,

    /// Add a habit to the library
    AddHabit {
        /// Habit name
        name: String,

        /// Soft daily window, e.g. 18:00
        #[arg(short, long, value_name = "HH:MM")]
        window: Option<String>,
    },

    /// Add a task, optionally anchored after a habit
    AddTask {
        /// Task title
        title: String,

        /// Habit id the task should follow
        #[arg(long = "after", value_name = "HABIT_ID")]
        after: Option<i64>,

        /// Difficulty, 1..=5
        #[arg(long)]
        difficulty: Option<u8>,
    },

    /// Show the daily review for the date
    Review,
}
