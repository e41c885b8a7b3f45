use serde::{Deserialize, Serialize};

/// Kind of step in the action plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Buy,
    Security,
    Review,
    Rebalance,
}

impl ActionCategory {
    /// Badge label shown next to the task.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Buy => "Purchase",
            ActionCategory::Security => "Security",
            ActionCategory::Review => "Review",
            ActionCategory::Rebalance => "Rebalance",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single checklist entry of the action plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Stable identifier used by the checklist (e.g., "a1")
    pub id: String,

    /// Free-text timing ("Feb 13", "Monthly", "When 3x")
    pub date_label: String,

    pub task: String,

    #[serde(default)]
    pub detail: String,

    pub category: ActionCategory,
}

impl ActionItem {
    pub fn new(
        id: impl Into<String>,
        date_label: impl Into<String>,
        task: impl Into<String>,
        detail: impl Into<String>,
        category: ActionCategory,
    ) -> Self {
        Self {
            id: id.into(),
            date_label: date_label.into(),
            task: task.into(),
            detail: detail.into(),
            category,
        }
    }
}
