//! Ordered per-session list of activities.

use super::models::Activity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("activity index {index} is out of range (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Activities in the order they were added to the report.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// Remove the activity at `index`, keeping the others in order.
    pub fn remove_at(&mut self, index: usize) -> Result<Activity, StoreError> {
        if index >= self.activities.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.activities.len(),
            });
        }
        Ok(self.activities.remove(index))
    }

    pub fn clear(&mut self) {
        self.activities.clear();
    }

    pub fn list(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
