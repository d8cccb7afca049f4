#[cfg(test)]
#[path = "solver_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthGateway;
use crate::domain::models::Credentials;
use crate::domain::models::GatewayError;
use crate::domain::models::HistoryEntry;
use crate::domain::models::HistoryGateway;
use crate::domain::models::SolveGateway;
use crate::domain::models::SolveResult;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed, please try again.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed, please try again.";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SolveRequestBody {
    formula: String,
    conclusion: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct FormulaPair {
    premise: String,
    conclusion: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HistoryResponse {
    formulas: Vec<FormulaPair>,
}

/// HTTP client for the solving service. Covers solving, history and
/// account endpoints, all rooted at the configured API URL.
pub struct SolverApi {
    url: String,
    timeout: Duration,
}

impl Default for SolverApi {
    fn default() -> SolverApi {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(10000);

        return SolverApi {
            url: Config::get(ConfigKey::ApiURL)
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_millis(timeout),
        };
    }
}

impl SolverApi {
    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        return reqwest::Client::new()
            .post(format!("{url}/{path}", url = self.url))
            .timeout(self.timeout);
    }
}

#[async_trait]
impl SolveGateway for SolverApi {
    #[allow(clippy::implicit_return)]
    async fn submit(
        &self,
        premise: &str,
        conclusion: &str,
        token: &str,
    ) -> Result<SolveResult, GatewayError> {
        let req = SolveRequestBody {
            formula: premise.to_string(),
            conclusion: conclusion.to_string(),
        };

        tracing::debug!(body = ?req, "Solve request");
        let res = self.post("solve").bearer_auth(token).json(&req).send().await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to reach the solving service");
                return Err(GatewayError::Other(err.to_string()));
            }
        };

        if res.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Solving service rejected the session token");
            return Err(GatewayError::Unauthorized);
        }

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status, body = %body, "Solve request failed");
            return Err(GatewayError::Other(format!("status {status}")));
        }

        return match res.json::<SolveResult>().await {
            Ok(solved) => {
                tracing::debug!(body = ?solved, "Solve response");
                Ok(solved)
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to decode solve response");
                Err(GatewayError::Other(err.to_string()))
            }
        };
    }
}

#[async_trait]
impl HistoryGateway for SolverApi {
    #[allow(clippy::implicit_return)]
    async fn fetch_history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        let res = self
            .post("history")
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to fetch formula history"
            );
            bail!(format!(
                "History request failed with status {}",
                res.status().as_u16()
            ));
        }

        let entries = res
            .json::<HistoryResponse>()
            .await?
            .formulas
            .into_iter()
            .map(|pair| {
                return HistoryEntry {
                    premise: pair.premise,
                    conclusion: pair.conclusion.unwrap_or_default(),
                };
            })
            .collect::<Vec<HistoryEntry>>();

        return Ok(entries);
    }
}

#[async_trait]
impl AuthGateway for SolverApi {
    #[allow(clippy::implicit_return)]
    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let req = CredentialsBody {
            username: credentials.username.to_string(),
            password: credentials.password.to_string(),
        };

        let res = self.post("register").json(&req).send().await;
        match res {
            Ok(res) if res.status().is_success() => return Ok(()),
            Ok(res) => {
                let status = res.status().as_u16();
                let body = res.text().await.unwrap_or_default();
                tracing::error!(status, body = %body, "Registration rejected");
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to reach the registration endpoint");
            }
        }

        bail!(REGISTER_FAILED_MESSAGE);
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let req = CredentialsBody {
            username: credentials.username.to_string(),
            password: credentials.password.to_string(),
        };

        let res = self.post("login").json(&req).send().await;
        match res {
            Ok(res) if res.status().is_success() => match res.json::<LoginResponse>().await {
                Ok(body) if !body.access_token.is_empty() => return Ok(body.access_token),
                Ok(_) => {
                    tracing::error!("Login response carried an empty token");
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to decode login response");
                }
            },
            Ok(res) => {
                let status = res.status().as_u16();
                let body = res.text().await.unwrap_or_default();
                tracing::error!(status, body = %body, "Login rejected");
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to reach the login endpoint");
            }
        }

        bail!(LOGIN_FAILED_MESSAGE);
    }
}
