use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;

use crate::domain::models::SessionStore;

/// Keeps the token in memory only. Used wherever persistence would get in
/// the way, mostly tests.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> MemorySessionStore {
        return MemorySessionStore {
            token: Mutex::new(Some(token.to_string())),
        };
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>> {
        let token = self
            .token
            .lock()
            .map_err(|_| return anyhow!("Session store lock poisoned"))?;
        return Ok(token.clone());
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut current = self
            .token
            .lock()
            .map_err(|_| return anyhow!("Session store lock poisoned"))?;
        *current = Some(token.to_string());
        return Ok(());
    }

    fn clear(&self) -> Result<()> {
        let mut current = self
            .token
            .lock()
            .map_err(|_| return anyhow!("Session store lock poisoned"))?;
        *current = None;
        return Ok(());
    }
}
