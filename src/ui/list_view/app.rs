use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::cli::Session;
use crate::controller::ListController;
use crate::error::Result;
use crate::source;
use crate::task::{Task, TaskId};

use super::picker::{owner_label, OwnerPicker, PickerAction};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    List,
    Favorites,
}

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub struct AppState {
    pub(crate) controller: ListController,
    pub(crate) selected: usize,
    pub(crate) favorite_selected: usize,
    pub(crate) focus: Focus,
    pub(crate) search_active: bool,
    pub(crate) owner_picker: Option<OwnerPicker>,
    pub(crate) show_help: bool,
    pub(crate) source_label: String,
    info_message: Option<String>,
    error_message: Option<String>,
    viewport_width: u16,
    narrow_width: u16,
}

impl AppState {
    pub(crate) fn new(page_size: usize, narrow_width: u16, source_label: String) -> Self {
        Self {
            controller: ListController::new(page_size),
            selected: 0,
            favorite_selected: 0,
            focus: Focus::List,
            search_active: false,
            owner_picker: None,
            show_help: false,
            source_label,
            info_message: None,
            error_message: None,
            viewport_width: 0,
            narrow_width,
        }
    }

    fn update_viewport(&mut self, width: u16) {
        self.viewport_width = width;
    }

    pub(crate) fn is_narrow(&self) -> bool {
        self.viewport_width > 0 && self.viewport_width < self.narrow_width
    }

    pub(crate) fn is_loading(&self) -> bool {
        !self.controller.is_loaded()
    }

    pub(crate) fn apply_loaded(&mut self, tasks: Vec<Task>) {
        let count = tasks.len();
        self.controller.load(tasks);
        self.selected = 0;
        self.clamp_selection();
        if count == 0 {
            self.set_error("no tasks loaded".to_string());
        } else {
            self.set_info(format!("loaded {count} tasks"));
        }
    }

    /// Task under the cursor in the focused panel.
    pub(crate) fn selected_task(&self) -> Option<&Task> {
        match self.focus {
            Focus::List => self.controller.page_tasks().into_iter().nth(self.selected),
            Focus::Favorites => self
                .controller
                .favorite_tasks()
                .into_iter()
                .nth(self.favorite_selected),
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::List => self.controller.page_tasks().len(),
            Focus::Favorites => self.controller.favorite_count(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.focused_len();
        let cursor = match self.focus {
            Focus::List => &mut self.selected,
            Focus::Favorites => &mut self.favorite_selected,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let max = (len - 1) as isize;
        *cursor = (*cursor as isize + delta).clamp(0, max) as usize;
    }

    fn clamp_selection(&mut self) {
        let page_len = self.controller.page_tasks().len();
        self.selected = self.selected.min(page_len.saturating_sub(1));
        let favorites_len = self.controller.favorite_count();
        self.favorite_selected = self.favorite_selected.min(favorites_len.saturating_sub(1));
    }

    fn after_page_change(&mut self, changed: bool) {
        if changed {
            self.selected = 0;
        }
    }

    fn after_query_change(&mut self, changed: bool) {
        if changed {
            self.selected = 0;
            self.clamp_selection();
        }
    }

    fn push_search_char(&mut self, ch: char) {
        let mut text = self.controller.query().search_text.clone();
        text.push(ch);
        let changed = self.controller.set_search_text(text);
        self.after_query_change(changed);
    }

    fn pop_search_char(&mut self) {
        let mut text = self.controller.query().search_text.clone();
        if text.pop().is_none() {
            return;
        }
        let changed = self.controller.set_search_text(text);
        self.after_query_change(changed);
    }

    fn clear_search(&mut self) {
        let changed = self.controller.set_search_text(String::new());
        self.after_query_change(changed);
    }

    fn cycle_completion(&mut self) {
        let next = self.controller.query().completion.cycle();
        let changed = self.controller.set_completion_filter(next);
        self.after_query_change(changed);
        self.set_info(format!("showing: {}", next.label()));
    }

    fn open_owner_picker(&mut self) {
        let owners = self.controller.owner_ids();
        self.owner_picker = Some(OwnerPicker::new(&owners, self.controller.query().owner));
    }

    fn toggle_selected_favorite(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        match self.focus {
            Focus::List => {
                let now_favorite = self.controller.toggle_favorite(id);
                if now_favorite {
                    self.set_info(format!("added {id} to favorites"));
                } else {
                    self.set_info(format!("removed {id} from favorites"));
                }
            }
            Focus::Favorites => self.remove_favorite(id),
        }
        self.clamp_selection();
    }

    fn remove_selected_favorite(&mut self) {
        if self.focus != Focus::Favorites {
            return;
        }
        if let Some(id) = self.selected_task().map(|task| task.id) {
            self.remove_favorite(id);
            self.clamp_selection();
        }
    }

    fn remove_favorite(&mut self, id: TaskId) {
        if self.controller.remove_favorite(id) {
            self.set_info(format!("removed {id} from favorites"));
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::Favorites,
            Focus::Favorites => Focus::List,
        };
        self.clamp_selection();
    }

    fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.info_message = None;
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.error_message = None;
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.error_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        None
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.owner_picker.is_some() {
            return "j/k move  enter apply  esc cancel".to_string();
        }
        if self.search_active {
            return "type to search  backspace delete  enter done  esc clear".to_string();
        }
        if self.focus == Focus::Favorites {
            return "j/k move  space/d remove  tab tasks  ? help  esc/q quit".to_string();
        }
        "j/k move  h/l page  / search  c status  u user  space favorite  tab favorites  ? help  esc/q quit"
            .to_string()
    }

    pub(crate) fn count_summary(&self) -> String {
        let query = self.controller.query();
        format!(
            "matches: {}/{}  status: {}  user: {}  favorites: {}",
            self.controller.filtered_count(),
            self.controller.raw().len(),
            query.completion.label(),
            owner_label(query.owner),
            self.controller.favorite_count()
        )
    }
}

pub fn run(session: Session) -> Result<()> {
    let Session { config, source } = session;
    let source_label = source.describe();
    let (fetch_rx, _fetch_thread) = source::spawn_fetch(source);
    let mut app = AppState::new(config.page_size, config.ui.narrow_width, source_label);
    run_terminal(&mut app, fetch_rx)
}

fn run_terminal(app: &mut AppState, fetch_rx: Receiver<Vec<Task>>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width);

    let result = run_loop(&mut terminal, app, fetch_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    fetch_rx: Receiver<Vec<Task>>,
) -> Result<()> {
    let mut fetch_rx = Some(fetch_rx);
    let mut dirty = true;
    loop {
        if let Some(received) = fetch_rx.as_ref().map(|rx| rx.try_recv()) {
            match received {
                Ok(tasks) => {
                    app.apply_loaded(tasks);
                    fetch_rx = None;
                    dirty = true;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    debug!("fetch thread ended without a result");
                    app.apply_loaded(Vec::new());
                    fetch_rx = None;
                    dirty = true;
                }
            }
        }

        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, _) => {
                    app.update_viewport(width);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Apply one key press. Returns true when the session should end.
pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if let Some(mut picker) = app.owner_picker.take() {
        match picker.handle_key(key) {
            PickerAction::None => app.owner_picker = Some(picker),
            PickerAction::Cancel => {}
            PickerAction::Confirm => {
                let owner = picker.selected_owner();
                let changed = app.controller.set_owner_filter(owner);
                app.after_query_change(changed);
                app.set_info(format!("showing: {}", owner_label(owner)));
            }
        }
        return false;
    }

    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search_active = false;
                app.clear_search();
            }
            KeyCode::Enter => app.search_active = false,
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_search();
            }
            KeyCode::Char(ch) => app.push_search_char(ch),
            _ => {}
        }
        return false;
    }

    if app.show_help && matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        app.show_help = false;
        return false;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char(' ') | KeyCode::Char('f') => app.toggle_selected_favorite(),
        KeyCode::Char('d') | KeyCode::Char('x') => app.remove_selected_favorite(),
        KeyCode::Char('/') => {
            app.focus = Focus::List;
            app.search_active = true;
        }
        KeyCode::Char('c') => app.cycle_completion(),
        KeyCode::Char('u') => app.open_owner_picker(),
        KeyCode::Left | KeyCode::Char('h') => {
            let changed = app.controller.prev_page();
            app.after_page_change(changed);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let changed = app.controller.next_page();
            app.after_page_change(changed);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            let changed = app.controller.first_page();
            app.after_page_change(changed);
        }
        KeyCode::End | KeyCode::Char('G') => {
            let changed = app.controller.last_page();
            app.after_page_change(changed);
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
            if let Some(page) = ch.to_digit(10) {
                let changed = app.controller.go_to_page(page as usize);
                app.after_page_change(changed);
            }
        }
        _ => {}
    }
    false
}
