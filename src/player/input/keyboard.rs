//! Keyboard input handling for the annotated player.
//!
//! Player shortcuts are described with host-neutral `KeyInput` values so any
//! host can feed them; the crossterm conversion and the terminal-only keys
//! (quit, menus, start over) live at the bottom of this module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::media::TimeSource;
use crate::player::session::PlaybackSession;
use crate::player::state::InputResult;

/// Playback rates reachable with the rate keys, slowest first.
pub const RATE_LADDER: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Physical keys the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Period,
    Comma,
    Space,
    KeyF,
    KeyC,
    Other,
}

/// A key press with the modifier state the player cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What a mapped key does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Seek relative to the current position (seconds, may be negative)
    SeekBy(f64),
    RateUp,
    RateDown,
    TogglePlay,
    ToggleFullscreen,
    ToggleTranscript,
}

/// Seek distances for the arrow and period/comma keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekSteps {
    pub coarse: f64,
    pub fine: f64,
}

impl Default for SeekSteps {
    fn default() -> Self {
        Self {
            coarse: 10.0,
            fine: 1.0,
        }
    }
}

/// Result of dispatching a key to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyOutcome {
    pub action: Option<KeyAction>,
    /// The host must suppress its default handling of the key
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub fn handled(action: KeyAction) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
        }
    }

    pub fn ignored() -> Self {
        Self {
            action: None,
            prevent_default: false,
        }
    }
}

/// Map a key press to a player action.
pub fn map_key(input: KeyInput, steps: &SeekSteps) -> Option<KeyAction> {
    match (input.key, input.shift) {
        (Key::ArrowRight, _) => Some(KeyAction::SeekBy(steps.coarse)),
        (Key::ArrowLeft, _) => Some(KeyAction::SeekBy(-steps.coarse)),
        (Key::Period, false) => Some(KeyAction::SeekBy(steps.fine)),
        (Key::Period, true) => Some(KeyAction::RateUp),
        (Key::Comma, false) => Some(KeyAction::SeekBy(-steps.fine)),
        (Key::Comma, true) => Some(KeyAction::RateDown),
        (Key::Space, _) => Some(KeyAction::TogglePlay),
        (Key::KeyF, _) => Some(KeyAction::ToggleFullscreen),
        (Key::KeyC, _) => Some(KeyAction::ToggleTranscript),
        (Key::Other, _) => None,
    }
}

/// Next rate on the ladder, or `None` at the end (no wraparound).
///
/// A rate that is not on the ladder steps to the closest ladder rate
/// strictly above (or below) it.
pub fn step_rate(current: f64, up: bool) -> Option<f64> {
    if up {
        RATE_LADDER.iter().copied().find(|&r| r > current + f64::EPSILON)
    } else {
        RATE_LADDER
            .iter()
            .rev()
            .copied()
            .find(|&r| r < current - f64::EPSILON)
    }
}

impl From<&KeyEvent> for KeyInput {
    fn from(event: &KeyEvent) -> Self {
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        // Terminals report Shift+. and Shift+, as the shifted characters.
        match event.code {
            KeyCode::Right => Self { key: Key::ArrowRight, shift },
            KeyCode::Left => Self { key: Key::ArrowLeft, shift },
            KeyCode::Char('.') => Self { key: Key::Period, shift },
            KeyCode::Char('>') => Self::shifted(Key::Period),
            KeyCode::Char(',') => Self { key: Key::Comma, shift },
            KeyCode::Char('<') => Self::shifted(Key::Comma),
            KeyCode::Char(' ') => Self::new(Key::Space),
            KeyCode::Char('f') | KeyCode::Char('F') => Self::new(Key::KeyF),
            KeyCode::Char('c') | KeyCode::Char('C') => Self::new(Key::KeyC),
            _ => Self::new(Key::Other),
        }
    }
}

/// Handle a keyboard event in the terminal host.
///
/// Terminal-only keys are handled first; everything else goes through the
/// player's key dispatcher.
pub fn handle_key_event<M: TimeSource>(
    key: KeyEvent,
    session: &mut PlaybackSession<M>,
) -> InputResult {
    match key.code {
        // === Quit ===
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return InputResult::Quit
        }
        KeyCode::Esc => {
            if session.state().any_menu_open() {
                session.close_menus();
                return InputResult::Continue;
            }
            if session.dismiss_pause_message() {
                return InputResult::Continue;
            }
            return InputResult::Quit;
        }

        // === Menus ===
        KeyCode::Char('s') => {
            session.toggle_speed_menu();
            return InputResult::Continue;
        }
        KeyCode::Char('l') => {
            session.toggle_captions_menu();
            return InputResult::Continue;
        }
        KeyCode::Char(c @ '0'..='9') if session.state().any_menu_open() => {
            handle_menu_choice(session, c);
            return InputResult::Continue;
        }

        // === Navigation ===
        KeyCode::Home | KeyCode::Char('0') => {
            session.start_over();
            return InputResult::Continue;
        }
        KeyCode::Enter => {
            session.dismiss_pause_message();
            return InputResult::Continue;
        }
        _ => {}
    }

    session.handle_key(KeyInput::from(&key));
    InputResult::Continue
}

/// Pick an entry from the open menu by its number.
///
/// Speed menu: `1`..`6` select ladder rates. Captions menu: `0` turns
/// captions off, `1`.. select languages in payload order.
fn handle_menu_choice<M: TimeSource>(session: &mut PlaybackSession<M>, choice: char) {
    let n = choice.to_digit(10).unwrap_or(0) as usize;
    if session.state().speed_menu_open {
        if let Some(&rate) = n.checked_sub(1).and_then(|i| RATE_LADDER.get(i)) {
            session.set_playback_rate(rate);
        }
    } else if session.state().captions_menu_open {
        if n == 0 {
            session.select_caption(None);
        } else {
            let language = session
                .subtitles()
                .languages()
                .nth(n - 1)
                .map(str::to_string);
            if let Some(language) = language {
                session.select_caption(Some(&language));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_keys() {
        let steps = SeekSteps::default();
        assert_eq!(
            map_key(KeyInput::new(Key::ArrowRight), &steps),
            Some(KeyAction::SeekBy(10.0))
        );
        assert_eq!(
            map_key(KeyInput::new(Key::ArrowLeft), &steps),
            Some(KeyAction::SeekBy(-10.0))
        );
        assert_eq!(
            map_key(KeyInput::new(Key::Period), &steps),
            Some(KeyAction::SeekBy(1.0))
        );
        assert_eq!(
            map_key(KeyInput::new(Key::Comma), &steps),
            Some(KeyAction::SeekBy(-1.0))
        );
    }

    #[test]
    fn shifted_period_and_comma_change_rate() {
        let steps = SeekSteps::default();
        assert_eq!(
            map_key(KeyInput::shifted(Key::Period), &steps),
            Some(KeyAction::RateUp)
        );
        assert_eq!(
            map_key(KeyInput::shifted(Key::Comma), &steps),
            Some(KeyAction::RateDown)
        );
    }

    #[test]
    fn toggles_and_unmapped() {
        let steps = SeekSteps::default();
        assert_eq!(
            map_key(KeyInput::new(Key::Space), &steps),
            Some(KeyAction::TogglePlay)
        );
        assert_eq!(
            map_key(KeyInput::new(Key::KeyF), &steps),
            Some(KeyAction::ToggleFullscreen)
        );
        assert_eq!(
            map_key(KeyInput::new(Key::KeyC), &steps),
            Some(KeyAction::ToggleTranscript)
        );
        assert_eq!(map_key(KeyInput::new(Key::Other), &steps), None);
    }

    #[test]
    fn rate_ladder_steps() {
        assert_eq!(step_rate(1.0, true), Some(1.25));
        assert_eq!(step_rate(1.0, false), Some(0.75));
        assert_eq!(step_rate(2.0, true), None);
        assert_eq!(step_rate(0.5, false), None);
    }

    #[test]
    fn off_ladder_rate_steps_to_neighbour() {
        assert_eq!(step_rate(1.1, true), Some(1.25));
        assert_eq!(step_rate(1.1, false), Some(1.0));
        assert_eq!(step_rate(3.0, true), None);
        assert_eq!(step_rate(3.0, false), Some(2.0));
    }

    #[test]
    fn crossterm_conversion() {
        let key = |code, modifiers| KeyInput::from(&KeyEvent::new(code, modifiers));

        assert_eq!(
            key(KeyCode::Char('>'), KeyModifiers::SHIFT),
            KeyInput::shifted(Key::Period)
        );
        assert_eq!(
            key(KeyCode::Char('<'), KeyModifiers::NONE),
            KeyInput::shifted(Key::Comma)
        );
        assert_eq!(
            key(KeyCode::Char('.'), KeyModifiers::NONE),
            KeyInput::new(Key::Period)
        );
        assert_eq!(
            key(KeyCode::Right, KeyModifiers::NONE),
            KeyInput::new(Key::ArrowRight)
        );
        assert_eq!(
            key(KeyCode::Char(' '), KeyModifiers::NONE),
            KeyInput::new(Key::Space)
        );
        assert_eq!(
            key(KeyCode::Char('x'), KeyModifiers::NONE),
            KeyInput::new(Key::Other)
        );
    }
}
