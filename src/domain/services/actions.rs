#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GatewayArc;
use crate::domain::models::SolveRequest;

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Tab - Switch focus between the premise and conclusion fields
- Esc - Leave the focused field, or close the history list
- Enter - Solve the formula, or pick the highlighted history entry
- CTRL+P - Open or close the history of previously solved formulas
- CTRL+A - Select the whole field
- Shift+Left/Right/Home/End - Extend the selection
- Up/Down arrow - Scroll the derivation, or move through the history list
- CTRL+U / CTRL+D - Page up and down through the derivation
- CTRL+C - Exit

PALETTE:
- F1 ¬, F2 ∧, F3 ∨, F4 →, F5 ↔, F6 (, F7 )
- Alt+A through Alt+G insert the letters A to G

Symbols replace the selection of the focused field. Nothing is inserted when no field has focus.
        "#;

    return text.trim().to_string();
}

async fn solve(gateway: GatewayArc, req: SolveRequest, tx: mpsc::UnboundedSender<Event>) {
    let res = gateway
        .submit(&req.premise, &req.conclusion, &req.token)
        .await;

    if tx.send(Event::SolveResponse(req.id, res)).is_err() {
        tracing::debug!(id = req.id.0, "Solve response arrived after the interface closed");
    }
}

async fn fetch_history(gateway: GatewayArc, token: String, tx: mpsc::UnboundedSender<Event>) {
    let res = gateway.fetch_history(&token).await;

    // Not cancelled when the interface goes away first.
    if tx.send(Event::HistoryResponse(res)).is_err() {
        tracing::debug!("History response arrived after the interface closed");
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs network requests for the interface until the action channel is
    /// closed. Each request runs in its own task and reports back as an event.
    pub async fn start(
        gateway: GatewayArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_gateway = gateway.clone();

            match action {
                Action::SolveRequest(req) => {
                    tokio::spawn(solve(worker_gateway, req, worker_tx));
                }
                Action::HistoryRequest(token) => {
                    tokio::spawn(fetch_history(worker_gateway, token, worker_tx));
                }
            }
        }

        return Ok(());
    }
}
