//! Per-user editing sessions, each owning one activity store.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::report::ActivityStore;

pub type SharedStore = Arc<Mutex<ActivityStore>>;

/// Live sessions keyed by id. Idle sessions are evicted after the TTL and
/// their activities (photos included) are dropped with them.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<Uuid, SharedStore>,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration, max_sessions: u64) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(idle_ttl)
            .max_capacity(max_sessions)
            .build();
        Self { sessions }
    }

    /// Start a session with an empty store.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(ActivityStore::new())))
            .await;
        log::info!("Session {} created", id);
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedStore> {
        self.sessions.get(id).await
    }

    /// End a session. Returns false when it did not exist.
    pub async fn end(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).await.is_some();
        if removed {
            log::info!("Session {} ended", id);
        }
        removed
    }
}
