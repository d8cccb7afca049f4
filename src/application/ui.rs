use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Field;
use crate::domain::models::Focus;
use crate::domain::models::Navigation;
use crate::domain::models::SessionStoreBox;
use crate::domain::models::Symbol;
use crate::domain::services::derivation;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::HistoryStatus;

fn field_line(text: &str, selection: Option<(usize, usize)>) -> Line<'static> {
    let (start, end) = match selection {
        Some(range) if range.0 != range.1 => range,
        _ => return Line::from(text.to_string()),
    };

    let before = text.chars().take(start).collect::<String>();
    let selected = text.chars().skip(start).take(end - start).collect::<String>();
    let after = text.chars().skip(end).collect::<String>();

    return Line::from(vec![
        Span::raw(before),
        Span::styled(selected, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ]);
}

fn render_field<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, field: Field, rect: Rect) {
    let composer = &app_state.composer;
    let focused = composer.focus() == Focus::from(field);
    let text = composer.draft().text(field);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(field.to_string());
    if focused {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let selection = if focused { Some(composer.cursor()) } else { None };
    let inner_width = usize::from(rect.width.saturating_sub(2)).max(1);
    let caret = composer.caret();
    let offset = if focused {
        caret.saturating_sub(inner_width - 1)
    } else {
        0
    };

    frame.render_widget(
        Paragraph::new(field_line(text, selection))
            .block(block)
            .scroll((0, u16::try_from(offset).unwrap_or(u16::MAX))),
        rect,
    );

    if focused {
        let column = u16::try_from(caret - offset).unwrap_or_default();
        frame.set_cursor(rect.x + 1 + column, rect.y + 1);
    }
}

fn render_palette<B: Backend>(frame: &mut Frame<B>, rect: Rect) {
    let spans = Symbol::iter()
        .flat_map(|symbol| {
            return vec![
                Span::styled(symbol.hotkey(), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {symbol}  "), Style::default().add_modifier(Modifier::BOLD)),
            ];
        })
        .collect::<Vec<Span>>();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Palette"),
        ),
        rect,
    );
}

fn render_status<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, rect: Rect) {
    let line = if let Some(notice) = &app_state.notice {
        Line::from(Span::styled(notice.to_string(), Style::default().fg(Color::Yellow)))
    } else if let Some(message) = app_state.workflow.error_message() {
        Line::from(Span::styled(message, Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled(
            "Enter solve · Tab switch field · CTRL+P history · CTRL+C quit",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_derivation<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState, rect: Rect) {
    if rect.width != app_state.last_known_width || rect.height != app_state.last_known_height {
        app_state.set_rect(rect);
    }

    if app_state.workflow.state().is_submitting() {
        app_state.loading.render(frame, rect);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title("Derivation");

    let solved = match app_state.workflow.result() {
        Some(solved) => solved,
        None => {
            frame.render_widget(
                Paragraph::new("Compose a formula and press Enter to solve it.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                rect,
            );
            return;
        }
    };

    frame.render_widget(
        Paragraph::new(derivation::as_lines(solved))
            .block(block)
            .scroll((app_state.scroll.position, 0)),
        rect,
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

fn popup_rect(area: Rect) -> Rect {
    let width = area.width.saturating_mul(3) / 4;
    let height = (area.height / 2).max(5).min(area.height);

    return Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
}

fn render_history<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, area: Rect) {
    let title = match app_state.history.status() {
        HistoryStatus::NotRequested | HistoryStatus::Loading => "History (loading)",
        HistoryStatus::Failed => "History (unavailable)",
        HistoryStatus::Loaded if app_state.history.entries().is_empty() => "History (empty)",
        HistoryStatus::Loaded => "History",
    };

    let items = app_state
        .history
        .entries()
        .iter()
        .map(|entry| return ListItem::new(entry.label()))
        .collect::<Vec<ListItem>>();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app_state.history_cursor));
    }

    let rect = popup_rect(area);
    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(
        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> "),
        rect,
        &mut state,
    );
}

fn render<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(frame.size());

    render_field(frame, app_state, Field::Premise, layout[0]);
    render_field(frame, app_state, Field::Conclusion, layout[1]);
    render_palette(frame, layout[2]);
    render_status(frame, app_state, layout[3]);
    render_derivation(frame, app_state, layout[4]);

    if app_state.history_open {
        let area = frame.size();
        render_history(frame, app_state, area);
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: &mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<Navigation> {
    loop {
        let pending = app_state.composer.pending_cursor().is_some();
        terminal.draw(|frame| {
            render(frame, app_state);
        })?;
        app_state.after_render();

        // Redraw so the caret lands behind a freshly inserted symbol.
        if pending {
            terminal.draw(|frame| {
                render(frame, app_state);
            })?;
        }

        let event = events.next().await?;
        if let Some(nav) = app_state.handle_event(event, tx)? {
            return Ok(nav);
        }
    }
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

/// Runs the formula composer until the user quits or has to log in again.
pub async fn start(
    store: SessionStoreBox,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<Navigation> {
    let mut app_state = AppState::new(store);
    if let Some(nav) = app_state.mount(&tx)? {
        return Ok(nav);
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut events = EventsService::new(rx);

    let res = start_loop(&mut terminal, &mut app_state, &tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
