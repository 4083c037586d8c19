//! List view controller.
//!
//! Owns every piece of session state (raw collection, query, page, favorites)
//! and exposes the user intents the presentation layer may trigger. Each
//! intent is applied atomically; presentation reads state through
//! [`ListController::snapshot`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::favorites::FavoriteSet;
use crate::filter::{self, Query};
use crate::paginate::Paginator;
use crate::task::{CompletionFilter, OwnerId, Task, TaskId};

/// Read-only state handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub tasks: Vec<Task>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub query: Query,
    pub favorite_ids: Vec<TaskId>,
    pub favorites: Vec<Task>,
    pub no_results: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListController {
    raw: Vec<Task>,
    index_by_id: HashMap<TaskId, usize>,
    query: Query,
    filtered: Vec<usize>,
    pager: Paginator,
    favorites: FavoriteSet,
    loaded: bool,
}

impl ListController {
    pub fn new(page_size: usize) -> Self {
        Self {
            pager: Paginator::new(page_size),
            ..Self::default()
        }
    }

    /// Publish the fetched collection.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.index_by_id = tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| (task.id, idx))
            .collect();
        self.raw = tasks;
        self.loaded = true;
        self.refilter();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn raw(&self) -> &[Task] {
        &self.raw
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn owner_ids(&self) -> Vec<OwnerId> {
        filter::owner_ids(&self.raw)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.query.search_text == text {
            return false;
        }
        self.query.search_text = text;
        self.refilter();
        true
    }

    pub fn set_completion_filter(&mut self, completion: CompletionFilter) -> bool {
        if self.query.completion == completion {
            return false;
        }
        self.query.completion = completion;
        self.refilter();
        true
    }

    pub fn set_owner_filter(&mut self, owner: Option<OwnerId>) -> bool {
        if self.query.owner == owner {
            return false;
        }
        self.query.owner = owner;
        self.refilter();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pager.go_to(page)
    }

    pub fn first_page(&mut self) -> bool {
        self.pager.first()
    }

    pub fn last_page(&mut self) -> bool {
        self.pager.last()
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Tasks on the active page.
    pub fn page_tasks(&self) -> Vec<&Task> {
        self.pager
            .page(&self.filtered)
            .iter()
            .map(|idx| &self.raw[*idx])
            .collect()
    }

    pub fn toggle_favorite(&mut self, id: TaskId) -> bool {
        self.favorites.toggle(id)
    }

    pub fn remove_favorite(&mut self, id: TaskId) -> bool {
        self.favorites.remove(id)
    }

    pub fn is_favorite(&self, id: TaskId) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Favorite records in insertion order, independent of the query.
    pub fn favorite_tasks(&self) -> Vec<&Task> {
        self.favorites
            .ids()
            .iter()
            .filter_map(|id| self.index_by_id.get(id).map(|idx| &self.raw[*idx]))
            .collect()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            tasks: self.page_tasks().into_iter().cloned().collect(),
            current_page: self.pager.current_page(),
            total_pages: self.pager.total_pages(),
            page_size: self.pager.page_size(),
            filtered_count: self.filtered.len(),
            total_count: self.raw.len(),
            query: self.query.clone(),
            favorite_ids: self.favorites.ids().to_vec(),
            favorites: self.favorite_tasks().into_iter().cloned().collect(),
            no_results: self.filtered.is_empty(),
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_task_indices(&self.raw, &self.query);
        self.pager.reset();
        self.pager.recompute(self.filtered.len());
        debug!(
            filtered = self.filtered.len(),
            total = self.raw.len(),
            pages = self.pager.total_pages(),
            "recomputed list view"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: u64) -> Vec<Task> {
        (1..=count)
            .map(|id| Task::new(id, format!("task {id}"), id % 2 == 0, (id - 1) / 5 + 1))
            .collect()
    }

    fn loaded(count: u64) -> ListController {
        let mut controller = ListController::new(10);
        controller.load(numbered(count));
        controller
    }

    fn page_ids(controller: &ListController) -> Vec<TaskId> {
        controller.page_tasks().iter().map(|task| task.id).collect()
    }

    #[test]
    fn starts_empty_before_load() {
        let controller = ListController::new(10);
        let snapshot = controller.snapshot();
        assert!(!controller.is_loaded());
        assert_eq!(snapshot.total_pages, 0);
        assert_eq!(snapshot.current_page, 1);
        assert!(snapshot.no_results);
    }

    #[test]
    fn twenty_five_tasks_third_page_has_five() {
        let mut controller = loaded(25);
        assert_eq!(controller.total_pages(), 3);
        assert!(controller.go_to_page(3));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.tasks.len(), 5);
        assert_eq!(snapshot.current_page, 3);
        assert_eq!(page_ids(&controller), vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn query_change_resets_page_even_when_still_valid() {
        let mut controller = loaded(60);
        assert!(controller.go_to_page(2));
        assert!(controller.set_search_text("task"));
        assert_eq!(controller.total_pages(), 6);
        assert_eq!(controller.current_page(), 1);

        controller.go_to_page(3);
        assert!(controller.set_completion_filter(CompletionFilter::NotCompleted));
        assert_eq!(controller.current_page(), 1);

        controller.go_to_page(2);
        assert!(controller.set_owner_filter(Some(1)));
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn setting_same_value_is_not_a_change() {
        let mut controller = loaded(30);
        controller.go_to_page(2);
        assert!(!controller.set_search_text(""));
        assert!(!controller.set_completion_filter(CompletionFilter::All));
        assert!(!controller.set_owner_filter(None));
        assert_eq!(controller.current_page(), 2);
    }

    #[test]
    fn reload_resets_to_first_page() {
        let mut controller = loaded(30);
        controller.go_to_page(3);
        controller.load(numbered(30));
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn completed_owner_without_matches_signals_no_results() {
        let mut controller = ListController::new(10);
        controller.load(vec![
            Task::new(1, "a", false, 3),
            Task::new(2, "b", true, 2),
            Task::new(3, "c", false, 3),
        ]);
        controller.set_completion_filter(CompletionFilter::Completed);
        controller.set_owner_filter(Some(3));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.total_pages, 0);
        assert!(snapshot.no_results);
        assert!(snapshot.tasks.is_empty());
        assert_eq!(snapshot.current_page, 1);
    }

    #[test]
    fn completed_owner_keeps_only_matching_tasks() {
        let mut controller = loaded(25);
        controller.set_completion_filter(CompletionFilter::Completed);
        controller.set_owner_filter(Some(3));
        assert_eq!(page_ids(&controller), vec![12, 14]);
    }

    #[test]
    fn favorites_survive_filters_that_hide_them() {
        let mut controller = loaded(25);
        assert!(controller.toggle_favorite(4));
        assert!(controller.toggle_favorite(1));
        controller.set_search_text("17");
        assert_eq!(page_ids(&controller), vec![17]);

        let favorites: Vec<TaskId> = controller.favorite_tasks().iter().map(|t| t.id).collect();
        assert_eq!(favorites, vec![4, 1]);
        assert!(controller.is_favorite(4));

        assert!(!controller.toggle_favorite(4));
        assert!(controller.remove_favorite(1));
        assert_eq!(controller.favorite_count(), 0);
    }

    #[test]
    fn snapshot_reports_favorites_in_insertion_order() {
        let mut controller = loaded(12);
        for id in [8, 3, 11] {
            controller.toggle_favorite(id);
        }
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.favorite_ids, vec![8, 3, 11]);
        let titles: Vec<&str> = snapshot.favorites.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["task 8", "task 3", "task 11"]);
    }

    #[test]
    fn pages_cover_filtered_view_without_overlap() {
        let mut controller = loaded(47);
        controller.set_completion_filter(CompletionFilter::NotCompleted);
        let mut seen = Vec::new();
        for page in 1..=controller.total_pages() {
            controller.go_to_page(page);
            seen.extend(page_ids(&controller));
        }
        let expected: Vec<TaskId> = (1..=47).filter(|id| id % 2 == 1).collect();
        assert_eq!(seen, expected);
    }
}
