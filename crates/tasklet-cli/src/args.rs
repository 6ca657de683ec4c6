use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CalendarArgs, RemindersArgs, SubtaskCommands, TaskCommands};

/// Main command-line interface for Tasklet
///
/// Tasklet keeps a personal to-do list: tasks with subtasks, start and due
/// dates, and a reminder when a task falls due. Running `tl` without a
/// command lists all tasks.
#[derive(Parser)]
#[command(version, about, name = "tl")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tasklet/tasklet.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Tasklet CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage subtasks within a task
    #[command(alias = "s")]
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommands,
    },
    /// Show days with tasks due, or the tasks due on one day
    #[command(alias = "c")]
    Calendar(CalendarArgs),
    /// Show scheduled reminders
    #[command(alias = "r")]
    Reminders(RemindersArgs),
}
