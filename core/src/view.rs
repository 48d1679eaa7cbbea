//! Search and status filtering over a loaded page of tasks.
//!
//! Pure and synchronous. Search runs first, then the status filter; both are
//! plain predicates so the result set does not depend on that order, and the
//! input order is always preserved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Todo;

/// Completion status filter selected in the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Incomplete => "incomplete",
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => todo.completed,
            StatusFilter::Incomplete => !todo.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "incomplete" => Ok(StatusFilter::Incomplete),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Case-insensitive substring match on the display title. An empty term
/// matches everything; an untitled task never matches a non-empty term.
pub fn matches_search(todo: &Todo, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    todo.display_title()
        .to_lowercase()
        .contains(&search_term.to_lowercase())
}

/// The subset of `items` to display for the given search term and filter.
pub fn compose_view(items: &[Todo], search_term: &str, filter: StatusFilter) -> Vec<Todo> {
    items
        .iter()
        .filter(|todo| matches_search(todo, search_term))
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

/// Why the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Search or filter excluded every loaded task.
    NoMatches,
    /// There is nothing to show regardless of search and filter.
    NoTodos,
}

impl EmptyState {
    /// `None` when `visible` has something to show.
    pub fn of(visible: &[Todo], search_term: &str, filter: StatusFilter) -> Option<Self> {
        if !visible.is_empty() {
            return None;
        }
        if !search_term.is_empty() || filter != StatusFilter::All {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoTodos)
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoMatches => "Try adjusting your search or filter criteria",
            EmptyState::NoTodos => "Get started by creating your first todo",
        }
    }
}
