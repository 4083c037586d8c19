//! Filter pipeline: raw collection plus query to an order-preserving subset.

use serde::{Deserialize, Serialize};

use crate::task::{CompletionFilter, OwnerId, Task};

/// Current query state of a view session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub search_text: String,
    pub completion: CompletionFilter,
    pub owner: Option<OwnerId>,
}

impl Query {
    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty()
            || self.completion != CompletionFilter::All
            || self.owner.is_some()
    }
}

fn matches_text(task: &Task, query_lower: &str, query_raw: &str) -> bool {
    if query_raw.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(query_lower) || task.id.to_string().contains(query_raw)
}

/// Positions in `tasks` that pass every predicate of `query`, ascending.
pub fn filter_task_indices(tasks: &[Task], query: &Query) -> Vec<usize> {
    let query_lower = query.search_text.to_lowercase();
    let mut indices = Vec::new();

    for (idx, task) in tasks.iter().enumerate() {
        if !matches_text(task, &query_lower, &query.search_text) {
            continue;
        }
        if !query.completion.matches(task) {
            continue;
        }
        if let Some(owner) = query.owner {
            if task.owner_id != owner {
                continue;
            }
        }
        indices.push(idx);
    }

    indices
}

/// Apply `query` to `tasks`, keeping the original relative order.
pub fn apply(tasks: &[Task], query: &Query) -> Vec<Task> {
    filter_task_indices(tasks, query)
        .into_iter()
        .map(|idx| tasks[idx].clone())
        .collect()
}

/// Distinct owner ids in ascending order.
pub fn owner_ids(tasks: &[Task]) -> Vec<OwnerId> {
    let mut owners: Vec<OwnerId> = tasks.iter().map(|task| task.owner_id).collect();
    owners.sort_unstable();
    owners.dedup();
    owners
}
