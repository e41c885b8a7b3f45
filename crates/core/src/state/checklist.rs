use std::collections::HashSet;

use serde::Serialize;

use crate::errors::CoreError;

/// Completion flags over a fixed, non-empty list of task ids.
///
/// Unknown ids are rejected with [`CoreError::UnknownTask`] and leave the state
/// untouched, so `count() <= total()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistState {
    /// Known ids, in display order
    tasks: Vec<String>,
    completed: HashSet<String>,
}

impl ChecklistState {
    pub fn new<I, S>(task_ids: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks: Vec<String> = task_ids.into_iter().map(Into::into).collect();
        if tasks.is_empty() {
            return Err(CoreError::ValidationError("checklist needs at least one task".into()));
        }
        Ok(Self {
            tasks,
            completed: HashSet::new(),
        })
    }

    /// Flip the completion flag of `id`. Returns the new flag.
    pub fn toggle(&mut self, id: &str) -> Result<bool, CoreError> {
        if !self.is_known(id) {
            return Err(CoreError::UnknownTask(id.to_string()));
        }
        if self.completed.remove(id) {
            Ok(false)
        } else {
            self.completed.insert(id.to_string());
            Ok(true)
        }
    }

    /// Absent and unknown ids read as not done.
    #[must_use]
    pub fn is_done(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn is_known(&self, id: &str) -> bool {
        self.tasks.iter().any(|t| t == id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    /// `count() / total()`, in [0, 1].
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        self.count() as f64 / self.total() as f64
    }

    /// Completed ids in display order.
    #[must_use]
    pub fn completed(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| self.completed.contains(t.as_str()))
            .map(String::as_str)
            .collect()
    }
}
