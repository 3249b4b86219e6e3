use serde::{Deserialize, Serialize};
use serenity_booking::CompanionRecord;
use serenity_shared::{AccountProfile, Masked};
use std::sync::{Mutex, RwLock};
use tracing::info;

use crate::{CoreError, CoreResult};

/// The signed-in identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Masked<String>,
    pub profile: AccountProfile,
}

/// Where the session survives restarts.
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> CoreResult<Option<Session>>;
    fn save(&self, session: &Session) -> CoreResult<()>;
    fn clear(&self) -> CoreResult<()>;
}

/// Keeps the session for the life of the process only
#[derive(Debug, Default)]
pub struct MemorySessionPersistence {
    stored: Mutex<Option<Session>>,
}

impl MemorySessionPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            stored: Mutex::new(Some(session)),
        }
    }
}

impl SessionPersistence for MemorySessionPersistence {
    fn load(&self) -> CoreResult<Option<Session>> {
        let stored = self.stored.lock().map_err(|e| CoreError::SessionStorage(e.to_string()))?;
        Ok(stored.clone())
    }

    fn save(&self, session: &Session) -> CoreResult<()> {
        let mut stored = self.stored.lock().map_err(|e| CoreError::SessionStorage(e.to_string()))?;
        *stored = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        let mut stored = self.stored.lock().map_err(|e| CoreError::SessionStorage(e.to_string()))?;
        *stored = None;
        Ok(())
    }
}

/// Holds at most one signed-in identity.
///
/// Passed explicitly to whatever needs the current identity; there is no
/// global instance.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    persistence: Box<dyn SessionPersistence>,
}

impl SessionStore {
    pub fn new(persistence: Box<dyn SessionPersistence>) -> Self {
        Self {
            current: RwLock::new(None),
            persistence,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySessionPersistence::new()))
    }

    /// Reload a persisted session, e.g. at startup.
    pub fn restore(&self) -> CoreResult<Option<Session>> {
        let loaded = self.persistence.load()?;
        if let Some(session) = &loaded {
            info!("Restored session for {}", session.profile.email);
        }
        *self.write()? = loaded.clone();
        Ok(loaded)
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn profile(&self) -> Option<AccountProfile> {
        self.current().map(|s| s.profile)
    }

    /// Token of the signed-in account, or `Unauthenticated`.
    pub fn require_token(&self) -> CoreResult<String> {
        self.current()
            .map(|s| s.token.into_inner())
            .ok_or(CoreError::Unauthenticated)
    }

    /// Replace any existing session.
    pub fn sign_in(&self, session: Session) -> CoreResult<()> {
        self.persistence.save(&session)?;
        info!("Signed in as {}", session.profile.email);
        *self.write()? = Some(session);
        Ok(())
    }

    pub fn sign_out(&self) -> CoreResult<()> {
        self.persistence.clear()?;
        if let Some(previous) = self.write()?.take() {
            info!("Signed out {}", previous.profile.email);
        }
        Ok(())
    }

    pub fn update_profile(&self, profile: AccountProfile) -> CoreResult<()> {
        let mut guard = self.write()?;
        let session = guard.as_mut().ok_or(CoreError::Unauthenticated)?;
        session.profile = profile;
        self.persistence.save(session)
    }

    /// Default for new companion records: the booker's own identity, if signed in.
    pub fn companion_template(&self) -> Option<CompanionRecord> {
        self.profile().map(|p| CompanionRecord::from_profile(&p))
    }

    /// Guest-type surcharge of the signed-in account.
    pub fn surcharge_rate(&self) -> Option<f64> {
        self.profile().and_then(|p| p.surcharge_rate)
    }

    fn write(&self) -> CoreResult<std::sync::RwLockWriteGuard<'_, Option<Session>>> {
        self.current
            .write()
            .map_err(|e| CoreError::SessionStorage(e.to_string()))
    }
}
