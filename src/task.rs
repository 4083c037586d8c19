//! Task records as served by the remote todo collection.
//!
//! Records are immutable once fetched: the pipeline only classifies and
//! selects them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub type TaskId = u64;
pub type OwnerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: OwnerId,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, completed: bool, owner_id: OwnerId) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            owner_id,
        }
    }
}

/// Completion filter applied after text matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    NotCompleted,
}

impl CompletionFilter {
    pub const ALL: [CompletionFilter; 3] = [
        CompletionFilter::All,
        CompletionFilter::Completed,
        CompletionFilter::NotCompleted,
    ];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Completed => task.completed,
            CompletionFilter::NotCompleted => !task.completed,
        }
    }

    /// Next filter in toggle order: all, completed, not completed.
    pub fn cycle(self) -> Self {
        match self {
            CompletionFilter::All => CompletionFilter::Completed,
            CompletionFilter::Completed => CompletionFilter::NotCompleted,
            CompletionFilter::NotCompleted => CompletionFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompletionFilter::All => "all",
            CompletionFilter::Completed => "completed",
            CompletionFilter::NotCompleted => "not-completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompletionFilter::All => "All",
            CompletionFilter::Completed => "Completed",
            CompletionFilter::NotCompleted => "Not Completed",
        }
    }
}

impl fmt::Display for CompletionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "all" => Ok(CompletionFilter::All),
            "completed" | "done" => Ok(CompletionFilter::Completed),
            "not-completed" | "notcompleted" | "open" => Ok(CompletionFilter::NotCompleted),
            _ => Err(Error::InvalidArgument(format!(
                "unknown completion filter: {value} (expected: all, completed, not-completed)"
            ))),
        }
    }
}
