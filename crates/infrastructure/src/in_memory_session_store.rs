use std::collections::HashMap;

use async_trait::async_trait;
use guardpost_application::SessionStore;
use guardpost_core::AppResult;
use tokio::sync::RwLock;

/// Process-local session store. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    /// Creates an empty in-memory session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, entries: &[(&str, String)]) -> AppResult<()> {
        let mut stored = self.entries.write().await;
        for (key, value) in entries {
            stored.insert((*key).to_owned(), value.clone());
        }

        Ok(())
    }

    async fn clear(&self, keys: &[&str]) -> AppResult<()> {
        let mut stored = self.entries.write().await;
        for key in keys {
            stored.remove(*key);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use guardpost_application::{SESSION_KEYS, SESSION_TOKEN_KEY, SESSION_USER_KEY, SessionStore};

    use super::InMemorySessionStore;

    #[tokio::test]
    async fn set_get_and_clear_round_trip() {
        let store = InMemorySessionStore::new();

        let written = store
            .set(&[
                (SESSION_TOKEN_KEY, "session-1".to_owned()),
                (SESSION_USER_KEY, "{}".to_owned()),
            ])
            .await;
        assert!(written.is_ok());
        assert_eq!(
            store.get(SESSION_TOKEN_KEY).await.ok().flatten().as_deref(),
            Some("session-1")
        );

        assert!(store.clear(&SESSION_KEYS).await.is_ok());
        assert!(matches!(store.get(SESSION_TOKEN_KEY).await, Ok(None)));
        assert!(matches!(store.get(SESSION_USER_KEY).await, Ok(None)));
    }

    #[tokio::test]
    async fn clearing_missing_keys_is_a_no_op() {
        let store = InMemorySessionStore::new();
        assert!(store.clear(&["never-written"]).await.is_ok());
    }
}
