use crate::domain::GestureEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Like the current profile
    Like,
    /// Pass on the current profile
    Pass,
    /// Start the deck over
    Reset,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Like: Right arrow or l
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Like,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Like,

        // Pass: Left arrow or p
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Pass,
        (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::Pass,

        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reset,

        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Turns left-button mouse drags over the top card into gesture phases.
///
/// Translations are reported in cells relative to where the button went
/// down, so each `Move` carries the cumulative delta.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<(u16, u16)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `card` is where the top card currently sits; presses elsewhere are
    /// not gestures.
    pub fn handle_mouse(&mut self, event: MouseEvent, card: Option<Rect>) -> Option<GestureEvent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.origin.take().is_some() {
                    // The release of the previous drag never arrived.
                    return Some(GestureEvent::Cancel);
                }
                let card = card?;
                if !contains(card, event.column, event.row) {
                    return None;
                }
                self.origin = Some((event.column, event.row));
                Some(GestureEvent::Start)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (x, y) = self.origin?;
                Some(GestureEvent::Move {
                    dx: event.column as f32 - x as f32,
                    dy: event.row as f32 - y as f32,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.origin.take()?;
                Some(GestureEvent::End)
            }
            _ => None,
        }
    }

    /// Abandons a drag in progress, e.g. when the terminal loses focus.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.origin.take().map(|_| GestureEvent::Cancel)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.left() && column < rect.right() && row >= rect.top() && row < rect.bottom()
}
