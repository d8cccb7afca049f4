#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::FormulaComposer;
use super::HistoryProvider;
use super::Scroll;
use super::SolveWorkflow;
use super::SubmitOutcome;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Navigation;
use crate::domain::models::SessionStoreBox;
use crate::domain::models::WorkflowState;

pub const EMPTY_PREMISE_NOTICE: &str = "Enter a premise before solving.";

/// Everything the solve view shows, plus the translation of input events
/// into composer, history and workflow operations.
pub struct AppState {
    pub composer: FormulaComposer,
    pub history: HistoryProvider,
    pub history_cursor: usize,
    pub history_open: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: Loading,
    pub notice: Option<String>,
    pub scroll: Scroll,
    pub workflow: SolveWorkflow,
    store: SessionStoreBox,
}

impl AppState {
    pub fn new(store: SessionStoreBox) -> AppState {
        return AppState {
            composer: FormulaComposer::default(),
            history: HistoryProvider::default(),
            history_cursor: 0,
            history_open: false,
            last_known_height: 0,
            last_known_width: 0,
            loading: Loading::default(),
            notice: None,
            scroll: Scroll::default(),
            workflow: SolveWorkflow::default(),
            store,
        };
    }

    pub fn store(&self) -> &SessionStoreBox {
        return &self.store;
    }

    /// Runs when the view opens. Without a token the view is left right away,
    /// otherwise the one history fetch is issued and the premise is focused.
    pub fn mount(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<Option<Navigation>> {
        if let Some(nav) = self.workflow.mount(self.store.as_ref()) {
            return Ok(Some(nav));
        }

        let token = self.store.get().unwrap_or_default();
        if let Some(action) = self.history.start(token.as_deref()) {
            tx.send(action)?;
        }

        self.composer.cycle_focus();

        return Ok(None);
    }

    pub fn after_render(&mut self) {
        self.composer.after_render();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_scroll();
    }

    fn sync_scroll(&mut self) {
        let steps = self
            .workflow
            .result()
            .map(|solved| return solved.steps.len())
            .unwrap_or_default();

        self.scroll.set_state(
            u16::try_from(steps).unwrap_or(u16::MAX),
            self.last_known_height.saturating_sub(2),
        );
    }

    fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<Option<Navigation>> {
        if !self.composer.is_submittable() {
            self.notice = Some(EMPTY_PREMISE_NOTICE.to_string());
            return Ok(None);
        }
        self.notice = None;

        match self.workflow.submit(self.composer.draft(), self.store.as_ref()) {
            SubmitOutcome::Dispatch(req) => {
                tracing::debug!(id = req.id.0, "Submitting formula");
                self.scroll.reset();
                self.sync_scroll();
                tx.send(Action::SolveRequest(req))?;
            }
            SubmitOutcome::Navigate(nav) => return Ok(Some(nav)),
            SubmitOutcome::Ignored => (),
        }

        return Ok(None);
    }

    fn move_history_cursor(&mut self, down: bool) {
        let len = self.history.entries().len();
        if len == 0 {
            self.history_cursor = 0;
            return;
        }

        if down {
            self.history_cursor = (self.history_cursor + 1).min(len - 1);
        } else {
            self.history_cursor = self.history_cursor.saturating_sub(1);
        }
    }

    fn toggle_history(&mut self) {
        self.history_open = !self.history_open;
        self.history_cursor = 0;
    }

    /// Applies one event. Returns where to navigate when the view has to be
    /// left.
    pub fn handle_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Option<Navigation>> {
        match event {
            Event::KeyboardCTRLC() => {
                return Ok(Some(Navigation::Quit));
            }
            Event::KeyboardCTRLP() => {
                self.toggle_history();
            }
            Event::KeyboardEsc() => {
                if self.history_open {
                    self.history_open = false;
                } else {
                    self.composer.clear_focus();
                }
            }
            Event::KeyboardEnter() => {
                if self.history_open {
                    if self.history.select(self.history_cursor, &mut self.composer) {
                        self.notice = None;
                    }
                    self.history_open = false;
                    return Ok(None);
                }

                return self.submit(tx);
            }
            Event::UIScrollUp() => {
                if self.history_open {
                    self.move_history_cursor(false);
                } else {
                    self.scroll.up();
                }
            }
            Event::UIScrollDown() => {
                if self.history_open {
                    self.move_history_cursor(true);
                } else {
                    self.scroll.down();
                }
            }
            Event::UIScrollPageUp() => {
                self.scroll.up_page();
            }
            Event::UIScrollPageDown() => {
                self.scroll.down_page();
            }
            Event::UITick() => {
                if self.workflow.state().is_submitting() {
                    self.loading.tick();
                }
            }
            Event::HistoryResponse(res) => {
                self.history.handle_response(res);
                self.history_cursor = 0;
            }
            Event::SolveResponse(id, res) => {
                let nav = self.workflow.complete(id, res, self.store.as_ref());
                if let WorkflowState::Success(_) = self.workflow.state() {
                    self.scroll.reset();
                }
                self.sync_scroll();

                return Ok(nav);
            }
            event => {
                if self.history_open {
                    return Ok(None);
                }

                self.notice = None;
                self.handle_editing(event);
            }
        }

        return Ok(None);
    }

    fn handle_editing(&mut self, event: Event) {
        match event {
            Event::KeyboardTab() => {
                self.composer.cycle_focus();
            }
            Event::PaletteSymbol(symbol) => {
                self.composer.insert_symbol(symbol);
            }
            Event::KeyboardCharInput(char) => {
                self.composer.insert_text(&char.to_string());
            }
            Event::KeyboardPaste(text) => {
                self.composer.insert_text(&text);
            }
            Event::KeyboardBackspace() => {
                self.composer.delete_backward();
            }
            Event::KeyboardDelete() => {
                self.composer.delete_forward();
            }
            Event::KeyboardCursor(movement, extend) => {
                self.composer.move_cursor(movement, extend);
            }
            Event::KeyboardCTRLA() => {
                self.composer.select_all();
            }
            _ => (),
        }
    }
}
