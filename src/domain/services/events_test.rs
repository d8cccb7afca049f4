use anyhow::bail;
use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyEventState;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use super::map_crossterm;
use crate::domain::models::CursorMove;
use crate::domain::models::Event;
use crate::domain::models::Symbol;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
    return map_crossterm(CrosstermEvent::Key(KeyEvent::new(code, modifiers)));
}

fn palette(event: Option<Event>) -> Result<Symbol> {
    match event {
        Some(Event::PaletteSymbol(symbol)) => return Ok(symbol),
        _ => bail!("Wrong enum"),
    }
}

#[test]
fn it_maps_function_keys_to_operators() -> Result<()> {
    assert_eq!(palette(key(KeyCode::F(1), KeyModifiers::NONE))?, Symbol::Negation);
    assert_eq!(palette(key(KeyCode::F(2), KeyModifiers::NONE))?, Symbol::Conjunction);
    assert_eq!(palette(key(KeyCode::F(7), KeyModifiers::NONE))?, Symbol::CloseParen);
    assert!(key(KeyCode::F(8), KeyModifiers::NONE).is_none());

    return Ok(());
}

#[test]
fn it_maps_alt_letters_to_variables() -> Result<()> {
    assert_eq!(palette(key(KeyCode::Char('a'), KeyModifiers::ALT))?, Symbol::A);
    assert_eq!(palette(key(KeyCode::Char('G'), KeyModifiers::ALT))?, Symbol::G);
    assert!(key(KeyCode::Char('h'), KeyModifiers::ALT).is_none());

    return Ok(());
}

#[test]
fn it_maps_control_keys() -> Result<()> {
    assert!(matches!(
        key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Some(Event::KeyboardCTRLC())
    ));
    assert!(matches!(
        key(KeyCode::Char('p'), KeyModifiers::CONTROL),
        Some(Event::KeyboardCTRLP())
    ));
    assert!(matches!(
        key(KeyCode::Char('a'), KeyModifiers::CONTROL),
        Some(Event::KeyboardCTRLA())
    ));
    assert!(matches!(
        key(KeyCode::Char('d'), KeyModifiers::CONTROL),
        Some(Event::UIScrollPageDown())
    ));
    assert!(key(KeyCode::Char('z'), KeyModifiers::CONTROL).is_none());

    return Ok(());
}

#[test]
fn it_maps_cursor_keys_with_selection() -> Result<()> {
    match key(KeyCode::Left, KeyModifiers::SHIFT) {
        Some(Event::KeyboardCursor(movement, extend)) => {
            assert_eq!(movement, CursorMove::Left);
            assert!(extend);
        }
        _ => bail!("Wrong enum"),
    }

    match key(KeyCode::End, KeyModifiers::NONE) {
        Some(Event::KeyboardCursor(movement, extend)) => {
            assert_eq!(movement, CursorMove::End);
            assert!(!extend);
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[test]
fn it_maps_plain_characters() -> Result<()> {
    match key(KeyCode::Char('p'), KeyModifiers::NONE) {
        Some(Event::KeyboardCharInput(c)) => assert_eq!(c, 'p'),
        _ => bail!("Wrong enum"),
    }

    match key(KeyCode::Char('Q'), KeyModifiers::SHIFT) {
        Some(Event::KeyboardCharInput(c)) => assert_eq!(c, 'Q'),
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[test]
fn it_ignores_key_releases() {
    let release = KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };

    assert!(map_crossterm(CrosstermEvent::Key(release)).is_none());
}

#[test]
fn it_maps_mouse_scrolling_and_paste() -> Result<()> {
    let scroll = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    };
    assert!(matches!(
        map_crossterm(CrosstermEvent::Mouse(scroll)),
        Some(Event::UIScrollDown())
    ));

    match map_crossterm(CrosstermEvent::Paste("p→q".to_string())) {
        Some(Event::KeyboardPaste(text)) => assert_eq!(text, "p→q"),
        _ => bail!("Wrong enum"),
    }

    assert!(map_crossterm(CrosstermEvent::FocusGained).is_none());

    return Ok(());
}
