use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::AppState;
use super::EMPTY_PREMISE_NOTICE;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::FailureKind;
use crate::domain::models::Field;
use crate::domain::models::Focus;
use crate::domain::models::GatewayError;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Navigation;
use crate::domain::models::SessionStore;
use crate::domain::models::SolveResult;
use crate::domain::models::Symbol;
use crate::domain::models::WorkflowState;
use crate::domain::models::GENERIC_FAILURE_MESSAGE;
use crate::domain::models::NOT_LOGGED_IN_MESSAGE;
use crate::domain::models::SESSION_EXPIRED_MESSAGE;
use crate::domain::services::derivation;
use crate::domain::services::derivation::POSITIVE_COLOR;
use crate::infrastructure::storage::memory::MemorySessionStore;

fn logged_in() -> AppState {
    return AppState::new(Box::new(MemorySessionStore::with_token("token123")));
}

fn logged_out() -> AppState {
    return AppState::new(Box::new(MemorySessionStore::default()));
}

fn send(
    app_state: &mut AppState,
    events: Vec<Event>,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<Option<Navigation>> {
    let mut nav = None;
    for event in events {
        nav = app_state.handle_event(event, tx)?;
        app_state.after_render();
    }

    return Ok(nav);
}

mod mount {
    use super::*;

    #[test]
    fn it_redirects_without_token() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_out();

        assert_eq!(app_state.mount(&tx)?, Some(Navigation::Login(None)));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_fetches_history_once_and_focuses_the_premise() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();

        assert_eq!(app_state.mount(&tx)?, None);
        assert_eq!(app_state.composer.focus(), Focus::Premise);

        match rx.try_recv()? {
            Action::HistoryRequest(token) => assert_eq!(token, "token123"),
            _ => bail!("Wrong enum"),
        }

        app_state.mount(&tx)?;
        assert!(rx.try_recv().is_err());

        return Ok(());
    }
}

mod submit {
    use super::*;

    #[test]
    fn it_composes_and_solves_end_to_end() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();
        assert_eq!(app_state.composer.premise(), "");
        app_state.composer.record_focus(Field::Premise, 0, 0);

        send(
            &mut app_state,
            vec![
                Event::PaletteSymbol(Symbol::A),
                Event::PaletteSymbol(Symbol::Conjunction),
                Event::PaletteSymbol(Symbol::B),
                Event::KeyboardEnter(),
            ],
            &tx,
        )?;
        assert_eq!(app_state.composer.premise(), "A∧B");
        assert_eq!(app_state.workflow.state(), &WorkflowState::Submitting);

        let req = match rx.try_recv()? {
            Action::SolveRequest(req) => req,
            _ => bail!("Wrong enum"),
        };
        assert_eq!(req.premise, "A∧B");
        assert_eq!(req.token, "token123");

        let solved = SolveResult {
            steps: vec![
                "A∧B is satisfiable with A=T,B=T".to_string(),
                "SATISFIABLE".to_string(),
            ],
            result: true,
        };
        let nav = send(
            &mut app_state,
            vec![Event::SolveResponse(req.id, Ok(solved.clone()))],
            &tx,
        )?;

        assert_eq!(nav, None);
        assert_eq!(app_state.workflow.state(), &WorkflowState::Success(solved.clone()));

        let lines = derivation::as_lines(app_state.workflow.result().unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1].spans.last().unwrap().style.bg,
            Some(POSITIVE_COLOR)
        );

        return Ok(());
    }

    #[test]
    fn it_redirects_without_token_and_sends_nothing() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_out();
        app_state.composer.set_premise("p∨q");

        let nav = send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;

        assert_eq!(
            nav,
            Some(Navigation::Login(Some(NOT_LOGGED_IN_MESSAGE.to_string())))
        );
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_expires_the_session_on_unauthorized() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();
        app_state.composer.set_premise("p∨q");

        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;
        let req = match rx.try_recv()? {
            Action::SolveRequest(req) => req,
            _ => bail!("Wrong enum"),
        };

        let nav = send(
            &mut app_state,
            vec![Event::SolveResponse(req.id, Err(GatewayError::Unauthorized))],
            &tx,
        )?;

        assert_eq!(
            nav,
            Some(Navigation::Login(Some(SESSION_EXPIRED_MESSAGE.to_string())))
        );
        assert_eq!(app_state.store().get()?, None);

        return Ok(());
    }

    #[test]
    fn it_keeps_everything_on_generic_failure() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();
        app_state.composer.set_premise("p∨q");
        app_state.composer.set_conclusion("p");

        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;
        let req = match rx.try_recv()? {
            Action::SolveRequest(req) => req,
            _ => bail!("Wrong enum"),
        };

        let nav = send(
            &mut app_state,
            vec![Event::SolveResponse(
                req.id,
                Err(GatewayError::Other("status 500".to_string())),
            )],
            &tx,
        )?;

        assert_eq!(nav, None);
        assert_eq!(app_state.store().get()?, Some("token123".to_string()));
        assert_eq!(app_state.composer.premise(), "p∨q");
        assert_eq!(app_state.composer.conclusion(), "p");
        assert_eq!(
            app_state.workflow.state(),
            &WorkflowState::Failed(FailureKind::Generic)
        );

        return Ok(());
    }

    #[test]
    fn it_sends_one_request_on_double_submit() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();
        app_state.composer.set_premise("p");

        send(
            &mut app_state,
            vec![Event::KeyboardEnter(), Event::KeyboardEnter()],
            &tx,
        )?;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_rejects_an_empty_premise_locally() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();

        let nav = send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;

        assert_eq!(nav, None);
        assert!(rx.try_recv().is_err());
        assert_eq!(app_state.notice, Some(EMPTY_PREMISE_NOTICE.to_string()));
        assert_eq!(app_state.workflow.state(), &WorkflowState::Idle);

        app_state.composer.record_focus(Field::Premise, 0, 0);
        send(&mut app_state, vec![Event::KeyboardCharInput('p')], &tx)?;
        assert_eq!(app_state.notice, None);

        return Ok(());
    }
}

mod history {
    use super::*;

    fn loaded(tx: &mpsc::UnboundedSender<Action>) -> Result<AppState> {
        let mut app_state = logged_in();
        app_state.mount(tx)?;
        send(
            &mut app_state,
            vec![Event::HistoryResponse(Ok(vec![
                HistoryEntry::new("(A∧B)→C", "C"),
                HistoryEntry::new("p∨q", "p"),
            ]))],
            tx,
        )?;

        return Ok(app_state);
    }

    #[test]
    fn it_replaces_the_draft_from_the_picker() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = loaded(&tx)?;
        app_state.composer.set_premise("¬¬¬A");
        app_state.composer.set_conclusion("B");

        send(
            &mut app_state,
            vec![
                Event::KeyboardCTRLP(),
                Event::UIScrollDown(),
                Event::UIScrollDown(),
                Event::KeyboardEnter(),
            ],
            &tx,
        )?;

        assert!(!app_state.history_open);
        assert_eq!(app_state.composer.premise(), "p∨q");
        assert_eq!(app_state.composer.conclusion(), "p");
        assert_eq!(app_state.workflow.state(), &WorkflowState::Idle);

        return Ok(());
    }

    #[test]
    fn it_does_not_edit_while_the_picker_is_open() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = loaded(&tx)?;

        send(
            &mut app_state,
            vec![
                Event::KeyboardCTRLP(),
                Event::KeyboardCharInput('x'),
                Event::KeyboardEsc(),
            ],
            &tx,
        )?;

        assert!(!app_state.history_open);
        assert_eq!(app_state.composer.premise(), "");
        assert_eq!(app_state.composer.focus(), Focus::Premise);

        return Ok(());
    }

    #[test]
    fn it_replaces_a_stale_notice_with_the_solve_outcome() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = loaded(&tx)?;
        rx.try_recv()?;

        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;
        assert_eq!(app_state.notice, Some(EMPTY_PREMISE_NOTICE.to_string()));

        send(
            &mut app_state,
            vec![Event::KeyboardCTRLP(), Event::KeyboardEnter()],
            &tx,
        )?;
        assert_eq!(app_state.composer.premise(), "(A∧B)→C");
        assert_eq!(app_state.notice, None);

        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;
        let req = match rx.try_recv()? {
            Action::SolveRequest(req) => req,
            _ => bail!("Wrong enum"),
        };

        send(
            &mut app_state,
            vec![Event::SolveResponse(
                req.id,
                Err(GatewayError::Other("status 500".to_string())),
            )],
            &tx,
        )?;

        assert_eq!(app_state.notice, None);
        assert_eq!(
            app_state.workflow.error_message(),
            Some(GENERIC_FAILURE_MESSAGE)
        );

        return Ok(());
    }

    #[test]
    fn it_clears_the_notice_once_a_submit_goes_out() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();

        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;
        assert!(app_state.notice.is_some());

        app_state.composer.set_premise("p∨q");
        send(&mut app_state, vec![Event::KeyboardEnter()], &tx)?;

        assert_eq!(app_state.notice, None);
        assert!(matches!(rx.try_recv()?, Action::SolveRequest(_)));

        return Ok(());
    }

    #[test]
    fn it_keeps_composing_when_history_fails() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = logged_in();
        app_state.mount(&tx)?;
        rx.try_recv()?;

        send(
            &mut app_state,
            vec![
                Event::HistoryResponse(Err(anyhow!("500 Internal Server Error"))),
                Event::PaletteSymbol(Symbol::Negation),
                Event::KeyboardCharInput('p'),
                Event::KeyboardEnter(),
            ],
            &tx,
        )?;

        assert!(app_state.history.entries().is_empty());
        assert_eq!(app_state.composer.premise(), "¬p");
        assert!(matches!(rx.try_recv()?, Action::SolveRequest(_)));

        return Ok(());
    }
}

#[test]
fn it_quits_on_ctrl_c() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = logged_in();

    let nav = send(&mut app_state, vec![Event::KeyboardCTRLC()], &tx)?;
    assert_eq!(nav, Some(Navigation::Quit));

    return Ok(());
}
