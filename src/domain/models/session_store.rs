use anyhow::Result;

/// Holds the current session token. Expiry is not tracked here, it is only
/// discovered when the solving service rejects the token.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<String>>;

    /// Stores the token. It is returned by every following `get`.
    fn set(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

pub type SessionStoreBox = Box<dyn SessionStore>;
