use super::SolveResult;

pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in. Please log in to solve formulas.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while processing the formula. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum FailureKind {
    Unauthenticated,
    SessionExpired,
    Generic,
}

impl FailureKind {
    /// The fixed text shown to the user. Raw server errors are never shown.
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Unauthenticated => return NOT_LOGGED_IN_MESSAGE,
            FailureKind::SessionExpired => return SESSION_EXPIRED_MESSAGE,
            FailureKind::Generic => return GENERIC_FAILURE_MESSAGE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting,
    Success(SolveResult),
    Failed(FailureKind),
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        return *self == WorkflowState::Submitting;
    }
}

/// Where the interface has to go next, with an optional notice to show there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Login(Option<String>),
    Quit,
}
