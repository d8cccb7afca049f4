#[cfg(test)]
#[path = "auth_services_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::AuthGateway;
use crate::domain::models::Credentials;
use crate::domain::models::SessionStore;

pub struct AuthService {}

impl AuthService {
    /// Exchanges credentials for a token and persists it. Nothing is stored
    /// when the gateway refuses the login.
    #[allow(clippy::implicit_return)]
    pub async fn login<G: AuthGateway + Send + Sync + ?Sized>(
        gateway: &G,
        store: &dyn SessionStore,
        credentials: &Credentials,
    ) -> Result<()> {
        let token = gateway.login(credentials).await?;
        store.set(&token)?;
        tracing::info!(username = %credentials.username, "Logged in");

        return Ok(());
    }

    /// Creates the account only. The stored session is left untouched, the
    /// caller logs in separately.
    #[allow(clippy::implicit_return)]
    pub async fn register<G: AuthGateway + Send + Sync + ?Sized>(
        gateway: &G,
        credentials: &Credentials,
    ) -> Result<()> {
        gateway.register(credentials).await?;
        tracing::info!(username = %credentials.username, "Registered account");

        return Ok(());
    }

    pub fn logout(store: &dyn SessionStore) -> Result<()> {
        store.clear()?;
        tracing::info!("Logged out");

        return Ok(());
    }

    pub fn is_logged_in(store: &dyn SessionStore) -> bool {
        return matches!(store.get(), Ok(Some(_)));
    }
}
