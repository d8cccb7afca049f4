use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::GatewayError;
use super::HistoryEntry;
use super::SolveResult;

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        return Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
    }
}

#[async_trait]
pub trait SolveGateway {
    /// Sends exactly one solve request. There are no retries, resubmitting is
    /// left to the user.
    async fn submit(
        &self,
        premise: &str,
        conclusion: &str,
        token: &str,
    ) -> Result<SolveResult, GatewayError>;
}

#[async_trait]
pub trait HistoryGateway {
    /// Returns the user's prior formula pairs in server order.
    async fn fetch_history(&self, token: &str) -> Result<Vec<HistoryEntry>>;
}

#[async_trait]
pub trait AuthGateway {
    async fn register(&self, credentials: &Credentials) -> Result<()>;

    /// Returns the access token for the account.
    async fn login(&self, credentials: &Credentials) -> Result<String>;
}

pub trait Gateway: SolveGateway + HistoryGateway + AuthGateway + Send + Sync {}

impl<T: SolveGateway + HistoryGateway + AuthGateway + Send + Sync> Gateway for T {}

pub type GatewayArc = Arc<dyn Gateway>;
