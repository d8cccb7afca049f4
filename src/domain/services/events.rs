#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::CursorMove;
use crate::domain::models::Event;
use crate::domain::models::Symbol;

fn map_key(keyevent: KeyEvent) -> Option<Event> {
    if keyevent.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = keyevent.modifiers.contains(KeyModifiers::CONTROL);
    let alt = keyevent.modifiers.contains(KeyModifiers::ALT);
    let shift = keyevent.modifiers.contains(KeyModifiers::SHIFT);

    match keyevent.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'a' => return Some(Event::KeyboardCTRLA()),
            'c' => return Some(Event::KeyboardCTRLC()),
            'd' => return Some(Event::UIScrollPageDown()),
            'p' => return Some(Event::KeyboardCTRLP()),
            'u' => return Some(Event::UIScrollPageUp()),
            _ => return None,
        },
        KeyCode::Char(c) if alt => {
            return Symbol::from_letter(c).map(|symbol| return Event::PaletteSymbol(symbol));
        }
        KeyCode::Char(c) => return Some(Event::KeyboardCharInput(c)),
        KeyCode::F(num) => {
            return Symbol::from_function_key(num).map(|symbol| return Event::PaletteSymbol(symbol));
        }
        KeyCode::Enter => return Some(Event::KeyboardEnter()),
        KeyCode::Tab | KeyCode::BackTab => return Some(Event::KeyboardTab()),
        KeyCode::Esc => return Some(Event::KeyboardEsc()),
        KeyCode::Backspace => return Some(Event::KeyboardBackspace()),
        KeyCode::Delete => return Some(Event::KeyboardDelete()),
        KeyCode::Left => return Some(Event::KeyboardCursor(CursorMove::Left, shift)),
        KeyCode::Right => return Some(Event::KeyboardCursor(CursorMove::Right, shift)),
        KeyCode::Home => return Some(Event::KeyboardCursor(CursorMove::Home, shift)),
        KeyCode::End => return Some(Event::KeyboardCursor(CursorMove::End, shift)),
        KeyCode::Up => return Some(Event::UIScrollUp()),
        KeyCode::Down => return Some(Event::UIScrollDown()),
        KeyCode::PageUp => return Some(Event::UIScrollPageUp()),
        KeyCode::PageDown => return Some(Event::UIScrollPageDown()),
        _ => return None,
    }
}

/// Translates a terminal event into an interface event. Key releases and
/// unbound keys map to nothing.
pub fn map_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => {
            return Some(Event::KeyboardPaste(text));
        }
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Key(keyevent) => {
            return map_key(keyevent);
        }
        _ => return None,
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    #[allow(clippy::implicit_return)]
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => map_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
