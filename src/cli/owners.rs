//! todoview owners command implementation

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;
use crate::filter::owner_ids;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::source::load_or_empty;
use crate::task::{OwnerId, Task};

use super::Session;

/// Options for the owners command
pub struct OwnersOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct OwnerSummary {
    owner_id: OwnerId,
    tasks: usize,
    completed: usize,
}

pub fn run(session: Session, options: OwnersOptions) -> Result<()> {
    let tasks = load_or_empty(&session.source);
    let report = summarize(&tasks);

    let mut human = HumanOutput::new("Owners").with_details_title("Users");
    if report.is_empty() {
        human.push_summary("No owners found.", "");
    }
    for owner in &report {
        human.push_detail(format_owner_line(owner));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "owners",
        &report,
        Some(&human),
    )
}

fn format_owner_line(owner: &OwnerSummary) -> String {
    let noun = if owner.tasks == 1 { "task" } else { "tasks" };
    format!(
        "user {}: {} {noun}, {} completed",
        owner.owner_id, owner.tasks, owner.completed
    )
}

fn summarize(tasks: &[Task]) -> Vec<OwnerSummary> {
    let mut counts: HashMap<OwnerId, (usize, usize)> = HashMap::new();
    for task in tasks {
        let entry = counts.entry(task.owner_id).or_default();
        entry.0 += 1;
        if task.completed {
            entry.1 += 1;
        }
    }
    owner_ids(tasks)
        .into_iter()
        .map(|owner_id| {
            let (tasks, completed) = counts.get(&owner_id).copied().unwrap_or_default();
            OwnerSummary {
                owner_id,
                tasks,
                completed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_counts_per_owner_in_order() {
        let tasks = vec![
            Task::new(1, "a", true, 2),
            Task::new(2, "b", false, 1),
            Task::new(3, "c", true, 2),
        ];
        let report = summarize(&tasks);
        let rows: Vec<(OwnerId, usize, usize)> = report
            .iter()
            .map(|row| (row.owner_id, row.tasks, row.completed))
            .collect();
        assert_eq!(rows, vec![(1, 1, 0), (2, 2, 2)]);
    }

    #[test]
    fn owner_line_uses_singular_for_one_task() {
        let report = summarize(&[Task::new(6, "f", true, 2), Task::new(1, "a", false, 1)]);
        assert_eq!(format_owner_line(&report[0]), "user 1: 1 task, 0 completed");
        let report = summarize(&[Task::new(1, "a", false, 1), Task::new(2, "b", true, 1)]);
        assert_eq!(format_owner_line(&report[0]), "user 1: 2 tasks, 1 completed");
    }
}
