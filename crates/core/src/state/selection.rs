use serde::{Deserialize, Serialize};

use crate::models::asset::normalize_symbol;

/// Which asset row is expanded: exactly one symbol, or none.
///
/// The only mutation is [`SelectionState::toggle`]. Checking the symbol
/// against the catalog is the caller's job (`StrategyDashboard` does it).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    /// Start with nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `symbol` expanded.
    pub fn with_default(symbol: impl Into<String>) -> Self {
        Self {
            selected: Some(normalize_symbol(&symbol.into())),
        }
    }

    /// Collapse `symbol` if it is the expanded row, otherwise expand it
    /// (replacing any previous selection). Returns the new selection.
    ///
    /// Symbols are compared in their normalized form, here and in
    /// [`SelectionState::is_selected`].
    pub fn toggle(&mut self, symbol: &str) -> Option<&str> {
        let wanted = normalize_symbol(symbol);
        self.selected = match self.selected.take() {
            Some(current) if current == wanted => None,
            _ => Some(wanted),
        };
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, symbol: &str) -> bool {
        self.selected.as_deref() == Some(normalize_symbol(symbol).as_str())
    }
}
