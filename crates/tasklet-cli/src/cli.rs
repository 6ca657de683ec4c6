//! Command definitions and handlers
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, so `tasklet_core::params` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → App
//! ```
//!
//! [`Cli`] runs one command against the [`App`] and renders the markdown
//! produced by the core `Display` impls.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::{civil, Timestamp};
use log::debug;
use tasklet_core::{
    display::{CalendarDays, CreateResult, DayAgenda, DeleteResult, Reminders, Tasks, UpdateResult},
    params::{AddSubtask, AddTask, SetDueDate, SubtaskRef, TaskRef, UpdateDetails},
    App, CompletionFilter,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Task commands
// ============================================================================

/// Create a new task
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask { title: val.title }
    }
}

/// List tasks
#[derive(Args)]
pub struct ListTasksArgs {
    /// Which tasks to show
    #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,
}

/// Command-line representation of [`CompletionFilter`]
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Every task
    All,
    /// Tasks not yet completed
    Pending,
    /// Completed tasks
    Completed,
}

impl From<FilterArg> for CompletionFilter {
    fn from(val: FilterArg) -> Self {
        match val {
            FilterArg::All => CompletionFilter::All,
            FilterArg::Pending => CompletionFilter::Pending,
            FilterArg::Completed => CompletionFilter::Completed,
        }
    }
}

/// Identifies one task
#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "Identifier of the task")]
    pub id: String,
}

impl From<TaskIdArgs> for TaskRef {
    fn from(val: TaskIdArgs) -> Self {
        TaskRef { id: val.id }
    }
}

/// Update start date, due date or description
///
/// Only the given fields are written; everything else is left as it is.
/// Dates are stored as entered.
#[derive(Args)]
pub struct DetailsArgs {
    #[arg(help = "Identifier of the task to update")]
    pub id: String,
    #[arg(long, help = "New start date")]
    pub start_date: Option<String>,
    #[arg(long, help = "New due date, stored verbatim (use `due` to get a reminder)")]
    pub end_date: Option<String>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
}

impl From<DetailsArgs> for UpdateDetails {
    fn from(val: DetailsArgs) -> Self {
        UpdateDetails {
            id: val.id,
            start_date: val.start_date,
            end_date: val.end_date,
            description: val.description,
        }
    }
}

/// Set a due date and request a reminder for it
#[derive(Args)]
pub struct DueArgs {
    #[arg(help = "Identifier of the task")]
    pub id: String,
    #[arg(help = "Due date: YYYY-MM-DD, YYYY-MM-DDTHH:MM (local time) or RFC 3339")]
    pub date: String,
    /// Store the date without scheduling a reminder
    #[arg(long)]
    pub no_remind: bool,
}

impl From<DueArgs> for SetDueDate {
    fn from(val: DueArgs) -> Self {
        SetDueDate {
            id: val.id,
            date: val.date,
            remind: !val.no_remind,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show a task with its details and subtasks
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Flip a task between open and done
    #[command(alias = "t")]
    Toggle(TaskIdArgs),
    /// Delete a task and its subtasks
    #[command(aliases = ["d", "rm"])]
    Delete(TaskIdArgs),
    /// Update start date, due date or description
    Details(DetailsArgs),
    /// Set a due date and request a reminder for it
    Due(DueArgs),
}

// ============================================================================
// Subtask commands
// ============================================================================

/// Add a subtask to a task
#[derive(Args)]
pub struct AddSubtaskArgs {
    #[arg(help = "Identifier of the parent task")]
    pub task_id: String,
    /// Text of the subtask
    pub text: String,
}

impl From<AddSubtaskArgs> for AddSubtask {
    fn from(val: AddSubtaskArgs) -> Self {
        AddSubtask {
            task_id: val.task_id,
            text: val.text,
        }
    }
}

/// Identifies one subtask
#[derive(Args)]
pub struct SubtaskIdArgs {
    #[arg(help = "Identifier of the parent task")]
    pub task_id: String,
    #[arg(help = "Identifier of the subtask")]
    pub subtask_id: String,
}

impl From<SubtaskIdArgs> for SubtaskRef {
    fn from(val: SubtaskIdArgs) -> Self {
        SubtaskRef {
            task_id: val.task_id,
            subtask_id: val.subtask_id,
        }
    }
}

#[derive(Subcommand)]
pub enum SubtaskCommands {
    /// Add a subtask to a task
    #[command(alias = "a")]
    Add(AddSubtaskArgs),
    /// Check or uncheck a subtask
    #[command(alias = "t")]
    Toggle(SubtaskIdArgs),
    /// Delete a subtask
    #[command(aliases = ["d", "rm"])]
    Delete(SubtaskIdArgs),
}

// ============================================================================
// Calendar and reminders
// ============================================================================

#[derive(Args)]
pub struct CalendarArgs {
    /// Day to show (YYYY-MM-DD); omit for the list of marked days
    pub day: Option<String>,
}

#[derive(Args)]
pub struct RemindersArgs {
    /// Deliver reminders that are due now and remove them from the queue
    #[arg(long)]
    pub due: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against the app and renders their output.
pub struct Cli {
    app: App,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(app: App, renderer: TerminalRenderer) -> Self {
        Self { app, renderer }
    }

    /// Lets background writes and reminder requests finish.
    pub async fn finish(self) {
        self.app.shutdown().await;
    }

    pub fn list_tasks(&self, filter: CompletionFilter) -> Result<()> {
        let tasks = Tasks(self.app.tasks_filtered(filter));
        self.renderer.render(&tasks.to_string())
    }

    pub fn handle_task_command(&mut self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => self.add_task(args.into()),
            TaskCommands::List(args) => self.list_tasks(args.filter.into()),
            TaskCommands::Show(args) => self.show_task(args.into()),
            TaskCommands::Toggle(args) => self.toggle_task(args.into()),
            TaskCommands::Delete(args) => self.delete_task(args.into()),
            TaskCommands::Details(args) => self.update_details(args.into()),
            TaskCommands::Due(args) => self.set_due_date(args.into()),
        }
    }

    pub fn handle_subtask_command(&mut self, command: SubtaskCommands) -> Result<()> {
        match command {
            SubtaskCommands::Add(args) => self.add_subtask(args.into()),
            SubtaskCommands::Toggle(args) => self.toggle_subtask(args.into()),
            SubtaskCommands::Delete(args) => self.delete_subtask(args.into()),
        }
    }

    fn add_task(&mut self, params: AddTask) -> Result<()> {
        params.validate()?;
        let Some(id) = self.app.add_task(&params.title) else {
            bail!("Task was not created");
        };
        let task = self.app.require_task(&id)?;
        self.renderer.render(&CreateResult::new(task).to_string())
    }

    fn show_task(&self, params: TaskRef) -> Result<()> {
        let task = self.app.require_task(&params.id)?;
        self.renderer.render(&task.to_string())
    }

    fn toggle_task(&mut self, params: TaskRef) -> Result<()> {
        self.app.require_task(&params.id)?;
        self.app.toggle_task(&params.id);

        let task = self.app.require_task(&params.id)?;
        let change = if task.completed {
            "Marked done"
        } else {
            "Marked open"
        };
        let result = UpdateResult::with_changes(task, vec![change.to_string()]);
        self.renderer.render(&result.to_string())
    }

    fn delete_task(&mut self, params: TaskRef) -> Result<()> {
        let task = self.app.require_task(&params.id)?;
        self.app.delete_task(&params.id);
        self.renderer.render(&DeleteResult::new(task).to_string())
    }

    fn update_details(&mut self, params: UpdateDetails) -> Result<()> {
        let (id, update) = params.into_update()?;
        self.app.require_task(&id)?;

        let mut changes = Vec::new();
        if let Some(start) = &update.start_date {
            changes.push(format!("Start date set to {start}"));
        }
        if let Some(end) = &update.end_date {
            changes.push(format!("Due date set to {end}"));
        }
        if update.description.is_some() {
            changes.push("Description updated".to_string());
        }

        if !self.app.update_task_details(&id, update) {
            changes = vec!["No changes".to_string()];
        }

        let task = self.app.require_task(&id)?;
        self.renderer
            .render(&UpdateResult::with_changes(task, changes).to_string())
    }

    fn set_due_date(&mut self, params: SetDueDate) -> Result<()> {
        let due = params.due_at()?;
        self.app.require_task(&params.id)?;
        self.app.set_due_date(&params.id, due, params.remind);

        let task = self.app.require_task(&params.id)?;
        let mut changes = vec![format!(
            "Due date set to {}",
            task.end_date.as_deref().unwrap_or_default()
        )];
        if params.remind {
            if due > Timestamp::now() {
                changes.push("Reminder requested".to_string());
            } else {
                changes.push("Due date is in the past; no reminder scheduled".to_string());
            }
        }
        self.renderer
            .render(&UpdateResult::with_changes(task, changes).to_string())
    }

    fn add_subtask(&mut self, params: AddSubtask) -> Result<()> {
        params.validate()?;
        self.app.require_task(&params.task_id)?;
        let Some(subtask_id) = self.app.add_subtask_text(&params.task_id, &params.text) else {
            bail!("Subtask was not created");
        };
        let subtask = self.app.require_subtask(&params.task_id, &subtask_id)?;
        self.renderer.render(&CreateResult::new(subtask).to_string())
    }

    fn toggle_subtask(&mut self, params: SubtaskRef) -> Result<()> {
        self.app
            .require_subtask(&params.task_id, &params.subtask_id)?;
        self.app.toggle_subtask(&params.task_id, &params.subtask_id);

        let subtask = self
            .app
            .require_subtask(&params.task_id, &params.subtask_id)?;
        let verb = if subtask.done { "Checked" } else { "Unchecked" };
        let task = self.app.require_task(&params.task_id)?;
        let result = UpdateResult::with_changes(task, vec![format!("{verb} '{}'", subtask.text)]);
        self.renderer.render(&result.to_string())
    }

    fn delete_subtask(&mut self, params: SubtaskRef) -> Result<()> {
        let subtask = self
            .app
            .require_subtask(&params.task_id, &params.subtask_id)?;
        self.app.delete_subtask(&params.task_id, &params.subtask_id);
        self.renderer.render(&DeleteResult::new(subtask).to_string())
    }

    pub fn show_calendar(&self, args: CalendarArgs) -> Result<()> {
        let output = match args.day {
            Some(day) => {
                day.parse::<civil::Date>()
                    .with_context(|| format!("Invalid day '{day}', expected YYYY-MM-DD"))?;
                DayAgenda {
                    day: &day,
                    tasks: self.app.tasks_on(&day),
                }
                .to_string()
            }
            None => CalendarDays(self.app.marked_dates()).to_string(),
        };
        self.renderer.render(&output)
    }

    pub async fn show_reminders(&self, args: RemindersArgs) -> Result<()> {
        let reminders = if args.due {
            let due = self
                .app
                .take_due_reminders(Timestamp::now())
                .await
                .context("Failed to deliver due reminders")?;
            debug!("Delivered {} reminder(s)", due.len());
            due
        } else {
            self.app
                .pending_reminders()
                .await
                .context("Failed to read reminders")?
        };
        self.renderer.render(&Reminders(reminders).to_string())
    }
}
