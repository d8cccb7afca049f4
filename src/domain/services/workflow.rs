#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;

use crate::domain::models::FailureKind;
use crate::domain::models::FormulaDraft;
use crate::domain::models::GatewayError;
use crate::domain::models::Navigation;
use crate::domain::models::RequestId;
use crate::domain::models::SessionStore;
use crate::domain::models::SolveRequest;
use crate::domain::models::SolveResult;
use crate::domain::models::WorkflowState;

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Send this request to the solving service.
    Dispatch(SolveRequest),
    Navigate(Navigation),
    /// A request is already in flight.
    Ignored,
}

fn read_token(store: &dyn SessionStore) -> Option<String> {
    return match store.get() {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = ?err, "Failed to read session token, treating as logged out");
            None
        }
    };
}

/// Drives a draft through submission and tracks the visible outcome. Every
/// failure ends up in `state`; nothing is returned as an error.
#[derive(Default)]
pub struct SolveWorkflow {
    state: WorkflowState,
    in_flight: Option<RequestId>,
    last_request_id: u64,
}

impl SolveWorkflow {
    pub fn state(&self) -> &WorkflowState {
        return &self.state;
    }

    pub fn result(&self) -> Option<&SolveResult> {
        if let WorkflowState::Success(result) = &self.state {
            return Some(result);
        }

        return None;
    }

    pub fn error_message(&self) -> Option<&'static str> {
        if let WorkflowState::Failed(kind) = &self.state {
            return Some(kind.message());
        }

        return None;
    }

    /// Checked when the solve view opens. Without a token the user goes
    /// straight to login.
    pub fn mount(&self, store: &dyn SessionStore) -> Option<Navigation> {
        if read_token(store).is_none() {
            return Some(Navigation::Login(None));
        }

        return None;
    }

    pub fn submit(&mut self, draft: &FormulaDraft, store: &dyn SessionStore) -> SubmitOutcome {
        if self.in_flight.is_some() {
            tracing::debug!("Ignoring submit while a solve request is in flight");
            return SubmitOutcome::Ignored;
        }

        self.state = WorkflowState::Idle;

        let token = match read_token(store) {
            Some(token) => token,
            None => {
                self.state = WorkflowState::Failed(FailureKind::Unauthenticated);
                return SubmitOutcome::Navigate(Navigation::Login(Some(
                    FailureKind::Unauthenticated.message().to_string(),
                )));
            }
        };

        self.last_request_id += 1;
        let id = RequestId(self.last_request_id);
        self.in_flight = Some(id);
        self.state = WorkflowState::Submitting;

        return SubmitOutcome::Dispatch(SolveRequest {
            id,
            premise: draft.premise.to_string(),
            conclusion: draft.conclusion.to_string(),
            token,
        });
    }

    /// Applies the gateway outcome of request `id`. Outcomes of requests that
    /// are no longer in flight are dropped.
    pub fn complete(
        &mut self,
        id: RequestId,
        res: Result<SolveResult, GatewayError>,
        store: &dyn SessionStore,
    ) -> Option<Navigation> {
        if self.in_flight != Some(id) {
            tracing::debug!(id = id.0, "Dropping stale solve response");
            return None;
        }
        self.in_flight = None;

        match res {
            Ok(result) => {
                self.state = WorkflowState::Success(result);
                return None;
            }
            Err(GatewayError::Unauthorized) => {
                if let Err(err) = store.clear() {
                    tracing::error!(error = ?err, "Failed to clear expired session token");
                }
                self.state = WorkflowState::Failed(FailureKind::SessionExpired);

                return Some(Navigation::Login(Some(
                    FailureKind::SessionExpired.message().to_string(),
                )));
            }
            Err(GatewayError::Other(reason)) => {
                tracing::error!(reason, "Solve request failed");
                self.state = WorkflowState::Failed(FailureKind::Generic);
                return None;
            }
        }
    }
}
