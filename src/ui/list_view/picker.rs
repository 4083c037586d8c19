use crossterm::event::{KeyCode, KeyEvent};

use crate::task::OwnerId;

pub const ALL_OWNERS_LABEL: &str = "All users";

/// Modal list of owner ids, with "all" as the first entry.
pub struct OwnerPicker {
    options: Vec<Option<OwnerId>>,
    selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Cancel,
    Confirm,
}

impl OwnerPicker {
    pub fn new(owners: &[OwnerId], current: Option<OwnerId>) -> Self {
        let mut options = Vec::with_capacity(owners.len() + 1);
        options.push(None);
        options.extend(owners.iter().copied().map(Some));
        let selected = options
            .iter()
            .position(|value| *value == current)
            .unwrap_or(0);
        Self { options, selected }
    }

    pub fn options(&self) -> &[Option<OwnerId>] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_owner(&self) -> Option<OwnerId> {
        self.options.get(self.selected).copied().flatten()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return PickerAction::Cancel,
            KeyCode::Enter => return PickerAction::Confirm,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.options.len().saturating_sub(1);
            }
            _ => {}
        }
        PickerAction::None
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;
    }
}

pub fn owner_label(owner: Option<OwnerId>) -> String {
    match owner {
        Some(id) => format!("User {id}"),
        None => ALL_OWNERS_LABEL.to_string(),
    }
}
