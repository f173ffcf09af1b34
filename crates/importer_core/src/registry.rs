use crate::ActiveJob;

/// Jobs currently tracked, in the order they were started.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRegistry {
    entries: Vec<ActiveJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id is already tracked.
    pub fn add(&mut self, entry: ActiveJob) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes in place; unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<ActiveJob> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn list(&self) -> &[ActiveJob] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&ActiveJob> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
