//! Partial update of a task's details.

/// Fields to overwrite on a task.
///
/// `None` leaves the current value untouched; `Some(v)` replaces it. There is
/// no way to clear a field through this type, so an absent field is never
/// mistaken for an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDetailsUpdate {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl TaskDetailsUpdate {
    /// Update that only sets the due date.
    pub fn end_date(date: impl Into<String>) -> Self {
        Self {
            end_date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Update that only sets the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.description.is_none()
    }
}
