//! Tasklet CLI Application
//!
//! Command-line front-end for the tasklet to-do list.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tasklet_core::{AppBuilder, CompletionFilter};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let app = AppBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tasklet")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Tasklet started");

    let mut cli = Cli::new(app, renderer);
    let result = match command {
        Some(Task { command }) => cli.handle_task_command(command),
        Some(Subtask { command }) => cli.handle_subtask_command(command),
        Some(Calendar(args)) => cli.show_calendar(args),
        Some(Reminders(args)) => cli.show_reminders(args).await,
        None => cli.list_tasks(CompletionFilter::All),
    };

    cli.finish().await;
    result
}
