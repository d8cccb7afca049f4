use anyhow::Result;

use super::GatewayError;
use super::HistoryEntry;
use super::RequestId;
use super::SolveResult;
use super::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
}

pub enum Event {
    HistoryResponse(Result<Vec<HistoryEntry>>),
    KeyboardBackspace(),
    KeyboardCharInput(char),
    KeyboardCTRLA(),
    KeyboardCTRLC(),
    KeyboardCTRLP(),
    KeyboardCursor(CursorMove, bool),
    KeyboardDelete(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardTab(),
    PaletteSymbol(Symbol),
    SolveResponse(RequestId, Result<SolveResult, GatewayError>),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
}
