use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{UserId, UserRecord};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub users: BTreeMap<UserId, UserRecord>,
    pub next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty user store
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a store pre-filled with records; new IDs continue after the highest one
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let next_id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            inner: Arc::new(RwLock::new(AppStateInner { users, next_id })),
        }
    }
}

impl AppStateInner {
    /// Hands out the next record ID
    pub fn allocate_id(&mut self) -> UserId {
        let id = UserId(self.next_id);
        self.next_id += 1;
        id
    }
}
