//! Favorite set: task ids marked by the user, kept in insertion order.

use std::collections::HashSet;

use crate::task::TaskId;

#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    order: Vec<TaskId>,
    members: HashSet<TaskId>,
    // Slot vacated by the latest toggle-off, restored if the next toggle re-adds it.
    vacated: Option<(TaskId, usize)>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns the new membership.
    ///
    /// Two consecutive toggles of the same id leave the order unchanged;
    /// otherwise a newly added id goes last.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.take(id) {
            self.vacated = Some((id, pos));
            return false;
        }
        match self.vacated.take() {
            Some((vacated_id, pos)) if vacated_id == id => {
                self.order.insert(pos.min(self.order.len()), id);
            }
            _ => self.order.push(id),
        }
        self.members.insert(id);
        true
    }

    /// Remove `id`. Returns whether it was a member.
    pub fn remove(&mut self, id: TaskId) -> bool {
        self.vacated = None;
        self.take(id).is_some()
    }

    fn take(&mut self, id: TaskId) -> Option<usize> {
        if !self.members.remove(&id) {
            return None;
        }
        let pos = self.order.iter().position(|candidate| *candidate == id)?;
        self.order.remove(pos);
        Some(pos)
    }

    pub fn is_favorite(&self, id: TaskId) -> bool {
        self.members.contains(&id)
    }

    /// Ids in the order they were added.
    pub fn ids(&self) -> &[TaskId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
