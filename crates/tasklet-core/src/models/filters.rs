//! Filter types for querying tasks.

use super::Task;

/// Filter by completion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Show every task
    #[default]
    All,
    /// Only tasks not yet completed
    Pending,
    /// Only completed tasks
    Completed,
}

impl CompletionFilter {
    /// Returns true if the task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Pending => !task.completed,
            CompletionFilter::Completed => task.completed,
        }
    }
}
