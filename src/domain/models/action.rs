use super::SolveRequest;

pub enum Action {
    HistoryRequest(String),
    SolveRequest(SolveRequest),
}
