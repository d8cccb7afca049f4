use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

/// Ordered derivation steps and the final verdict of the solving service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub steps: Vec<String>,
    pub result: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("the session token was rejected by the solving service")]
    Unauthorized,
    #[error("the solving service failed: {0}")]
    Other(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveRequest {
    pub id: RequestId,
    pub premise: String,
    pub conclusion: String,
    pub token: String,
}
