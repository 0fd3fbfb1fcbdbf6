use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::common::{entities::app_errors::CoreError, ports::KeyValueStore};

use super::entities::{Session, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Single owner of the session. The API client reads the bearer token from it and
/// tears it down when the server rejects the token.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Restores whatever session the store holds. A stored profile that no longer
    /// parses is dropped; the token alone is still a session.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let token = store.get(TOKEN_KEY).unwrap_or_else(|e| {
            warn!("Failed to read stored token: {}", e);
            None
        });

        let current = token.filter(|t| !t.is_empty()).map(|token| {
            let user = match store.get(USER_KEY) {
                Ok(Some(raw)) => serde_json::from_str::<User>(&raw)
                    .map_err(|e| debug!("Ignoring malformed stored user: {}", e))
                    .ok(),
                Ok(None) => None,
                Err(e) => {
                    warn!("Failed to read stored user: {}", e);
                    None
                }
            };
            Session::new(token, user)
        });

        Self {
            store,
            current: RwLock::new(current),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn user(&self) -> Option<User> {
        self.current().and_then(|s| s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn begin(&self, session: Session) -> Result<(), CoreError> {
        self.store.set(TOKEN_KEY, &session.token)?;
        match &session.user {
            Some(user) => {
                let raw = serde_json::to_string(user)
                    .map_err(|e| CoreError::Storage(format!("Failed to encode user: {}", e)))?;
                self.store.set(USER_KEY, &raw)?;
            }
            None => self.store.remove(USER_KEY)?,
        }

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Explicit logout. Clearing an already empty session is not an error. Both keys
    /// are removed even if the first removal fails; the first error is returned.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }

    /// Teardown after the server answered 401. May be reached from several requests
    /// at once, so it never fails: store errors are logged and the in-memory session
    /// is dropped regardless.
    pub fn expire(&self) {
        let had_session = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();

        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to remove {} during session teardown: {}", key, e);
            }
        }

        if had_session {
            warn!("Session rejected by server, local session cleared");
        }
    }
}
