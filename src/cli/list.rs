//! todoview list command implementation
//!
//! Loads the collection, applies the query and prints one page.

use crate::controller::{ListController, ViewSnapshot};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::source::load_or_empty;
use crate::task::{CompletionFilter, Task};

use super::Session;

/// Options for the list command
pub struct ListOptions {
    pub search: String,
    pub status: String,
    pub owner: Option<u64>,
    pub page: usize,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(session: Session, options: ListOptions) -> Result<()> {
    let completion: CompletionFilter = options.status.parse()?;

    let mut controller = ListController::new(session.config.page_size);
    controller.load(load_or_empty(&session.source));
    controller.set_search_text(options.search);
    controller.set_completion_filter(completion);
    controller.set_owner_filter(options.owner);

    let mut warnings = Vec::new();
    if options.page != controller.current_page() && !controller.go_to_page(options.page) {
        warnings.push(format!(
            "page {} is out of range; showing page {}",
            options.page,
            controller.current_page()
        ));
    }

    let snapshot = controller.snapshot();
    let human = build_human(&snapshot, &warnings);
    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &snapshot,
        Some(&human),
    )
}

fn build_human(snapshot: &ViewSnapshot, warnings: &[String]) -> HumanOutput {
    let mut human = HumanOutput::new("Todo List");
    if snapshot.no_results {
        human.push_summary("No results found.", "");
    } else {
        human.push_summary(
            "page",
            format!("{} of {}", snapshot.current_page, snapshot.total_pages),
        );
        human.push_summary(
            "matches",
            format!("{} of {}", snapshot.filtered_count, snapshot.total_count),
        );
    }
    if !snapshot.query.search_text.is_empty() {
        human.push_summary("search", snapshot.query.search_text.clone());
    }
    if snapshot.query.completion != CompletionFilter::All {
        human.push_summary("status", snapshot.query.completion.label());
    }
    if let Some(owner) = snapshot.query.owner {
        human.push_summary("owner", owner.to_string());
    }
    for task in &snapshot.tasks {
        human.push_detail(format_task_line(task));
    }
    for warning in warnings {
        human.push_warning(warning.clone());
    }
    human
}

pub(crate) fn format_task_line(task: &Task) -> String {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    format!(
        "{marker} {}. {} (user {})",
        task.id, task.title, task.owner_id
    )
}
