use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::common::UserId;

/// Display name shown when an author document is missing or unreadable.
pub const PLACEHOLDER_AUTHOR: &str = "Usuário";

/// Display record for a post author.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorProfile {
    pub name: String,
    pub photo_url: Option<String>,
}

impl AuthorProfile {
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_AUTHOR.to_string(),
            photo_url: None,
        }
    }
}

/// Process-lifetime author display cache.
///
/// Populated lazily as search results reference unseen authors. Entries are
/// never evicted or invalidated; a rename only shows up after restart.
#[derive(Clone, Default)]
pub struct AuthorCache {
    inner: Arc<Mutex<HashMap<UserId, AuthorProfile>>>,
}

impl AuthorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, uid: &UserId) -> bool {
        self.inner.lock().unwrap().contains_key(uid)
    }

    pub fn get(&self, uid: &UserId) -> Option<AuthorProfile> {
        self.inner.lock().unwrap().get(uid).cloned()
    }

    /// Add newly fetched records. Existing entries are left untouched.
    pub fn merge(&self, entries: impl IntoIterator<Item = (UserId, AuthorProfile)>) {
        let mut inner = self.inner.lock().unwrap();
        for (uid, profile) in entries {
            inner.entry(uid).or_insert(profile);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
