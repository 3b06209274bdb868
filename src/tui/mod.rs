//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One event is handled to completion before the next. Highlight fetches run
//! as tokio tasks and report back over an mpsc channel as
//! `Action::HighlightsLoaded`, which is applied on this thread like any other
//! action, so `App` is never touched from two places.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms and only redraws on events or resize.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::task::AbortHandle;

use crate::api::HighlightSource;
use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ListEvent, ListViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub list: ListViewState,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            list: ListViewState::new(&app.current_screen().items),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Runs the UI until the user quits. The terminal is restored on every exit path.
pub fn run(app: App) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|guard| {
        let result = event_loop(&mut terminal, app);
        drop(guard);
        result
    });
    ratatui::restore();
    result
}

/// Fetch task currently running, if any.
#[derive(Default)]
struct FetchSlot {
    handle: Option<AbortHandle>,
}

impl FetchSlot {
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: App) -> io::Result<()> {
    let mut tui = TuiState::new(&app);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut fetch = FetchSlot::default();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };

        // Process the first event, then drain everything pending before the next draw
        let mut should_quit = false;
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            if let Some(action) = interpret(&mut tui, &app, event) {
                let effect = dispatch(&mut app, &mut tui, action);
                if handle_effect(effect, &app, &tx, &mut fetch) {
                    should_quit = true;
                    break;
                }
            }
            next = poll_event_immediate()?;
        }

        if should_quit {
            break;
        }

        // Apply background fetch results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = dispatch(&mut app, &mut tui, action);
            handle_effect(effect, &app, &tx, &mut fetch);
        }
        if !app.is_loading() {
            fetch.handle = None;
        }
    }

    fetch.cancel();
    info!("Shutting down");
    Ok(())
}

/// Turns a terminal event into a core action, letting the list view handle
/// everything that is purely presentational.
fn interpret(tui: &mut TuiState, app: &App, event: TuiEvent) -> Option<Action> {
    match event {
        // Resize only affects layout; ratatui picks up the new size on the next draw.
        TuiEvent::Resize(width, height) => {
            debug!("Terminal resized to {}x{}", width, height);
            None
        }
        TuiEvent::ForceQuit => Some(Action::Quit),
        other => match tui.list.handle_event(&other)? {
            ListEvent::Open(index) => app
                .current_screen()
                .items
                .get(index)
                .cloned()
                .map(Action::Select),
            ListEvent::Back => Some(Action::Back),
            ListEvent::Quit => Some(Action::Quit),
        },
    }
}

/// Applies an action and resets the list view when the screen changed.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    debug!("Dispatching: {:?}", action);
    let depth_before = app.navigator.depth();
    let effect = update(app, action);
    // Each action pushes or pops at most one screen, so depth tells us.
    if app.navigator.depth() != depth_before {
        tui.list.set_items(&app.current_screen().items);
    }
    effect
}

/// Performs an effect's I/O. Returns true when the app should exit.
fn handle_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    fetch: &mut FetchSlot,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchHighlights {
            request_id,
            book_id,
        } => {
            fetch.cancel();
            fetch.handle = Some(spawn_fetch(
                app.source.clone(),
                request_id,
                book_id,
                tx.clone(),
            ));
            false
        }
        Effect::CancelFetch => {
            fetch.cancel();
            false
        }
    }
}

fn spawn_fetch(
    source: Arc<dyn HighlightSource>,
    request_id: u64,
    book_id: i64,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning highlight fetch via {} (book_id={}, request_id={})",
        source.name(),
        book_id,
        request_id
    );
    tokio::spawn(async move {
        let result = source.fetch_highlights(book_id).await;
        if tx
            .send(Action::HighlightsLoaded { request_id, result })
            .is_err()
        {
            warn!(
                "Failed to deliver highlights for request_id={}: receiver dropped",
                request_id
            );
        }
    })
    .abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_enter_on_book_requests_fetch() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        let action = interpret(&mut tui, &app, TuiEvent::Submit).unwrap();
        let effect = dispatch(&mut app, &mut tui, action);
        assert!(matches!(
            effect,
            Effect::FetchHighlights { book_id: 1, .. }
        ));
    }

    #[test]
    fn test_q_and_ctrl_c_quit() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert!(matches!(
            interpret(&mut tui, &app, TuiEvent::InputChar('q')),
            Some(Action::Quit)
        ));
        assert!(matches!(
            interpret(&mut tui, &app, TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_resize_is_not_an_action() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert!(interpret(&mut tui, &app, TuiEvent::Resize(80, 24)).is_none());
    }

    #[test]
    fn test_push_and_pop_reset_list_view() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        // Move to Emma, then open it.
        interpret(&mut tui, &app, TuiEvent::CursorDown);
        let action = interpret(&mut tui, &app, TuiEvent::Submit).unwrap();
        let Effect::FetchHighlights { request_id, .. } = dispatch(&mut app, &mut tui, action)
        else {
            panic!("expected a fetch");
        };
        assert_eq!(tui.list.selected_index(), Some(1));

        dispatch(
            &mut app,
            &mut tui,
            Action::HighlightsLoaded {
                request_id,
                result: Ok(vec![]),
            },
        );
        assert_eq!(app.current_screen().title, "Emma");
        assert!(tui.list.visible().is_empty());

        let action = interpret(&mut tui, &app, TuiEvent::InputChar('b')).unwrap();
        dispatch(&mut app, &mut tui, action);
        assert_eq!(app.current_screen().title, "Books");
        assert_eq!(tui.list.visible(), &[0, 1]);
        assert_eq!(tui.list.selected_index(), Some(0));
    }

    #[test]
    fn test_cancel_effect_clears_fetch_slot() {
        let app = test_app();
        let (tx, _rx) = mpsc::channel();
        let mut fetch = FetchSlot::default();
        assert!(!handle_effect(Effect::CancelFetch, &app, &tx, &mut fetch));
        assert!(fetch.handle.is_none());
        assert!(handle_effect(Effect::Quit, &app, &tx, &mut fetch));
    }

    #[tokio::test]
    async fn test_spawned_fetch_reports_back() {
        let app = test_app();
        let (tx, rx) = mpsc::channel();
        let handle = spawn_fetch(app.source.clone(), 7, 1, tx);

        // The stub resolves immediately; wait for the task to finish.
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        match rx.try_recv() {
            Ok(Action::HighlightsLoaded { request_id, result }) => {
                assert_eq!(request_id, 7);
                assert_eq!(result, Ok(vec![]));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
