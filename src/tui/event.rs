use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};

/// TUI-specific input events.
///
/// Keys are mapped without interpretation: whether `q` quits or edits the
/// filter depends on the list view's mode, so that decision lives there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C: quits from any mode.
    ForceQuit,
    Submit,
    Escape,
    Backspace,
    InputChar(char),
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    Home,
    End,
    ScrollUp,
    ScrollDown,
    Resize(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        Ok(map_event(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a raw crossterm event. Unhandled events map to `None`.
pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Release/repeat events only show up on terminals that report them.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, _) | (KeyModifiers::ALT, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        (_, KeyCode::Home) => Some(TuiEvent::Home),
        (_, KeyCode::End) => Some(TuiEvent::End),
        _ => None,
    }
}
