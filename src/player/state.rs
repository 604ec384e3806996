//! Player UI state
//!
//! Contains the `PlayerState` struct that holds the UI-facing flags of a
//! session (play state, panels, menus, pause message), as well as shared
//! types used across player modules.

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// UI state of a playback session.
#[derive(Debug, Clone)]
pub struct PlayerState {
    // === Playback ===
    /// Whether the media is currently playing
    pub playing: bool,
    /// Whether playback has been started at least once
    pub started: bool,

    // === Panels and menus ===
    /// Whether the player fills the screen
    pub fullscreen: bool,
    /// Whether the transcript panel is shown
    pub show_transcript: bool,
    /// Whether the playback speed menu is open
    pub speed_menu_open: bool,
    /// Whether the captions menu is open
    pub captions_menu_open: bool,
    /// Message of the last fired Pause event, until dismissed
    pub pause_message: Option<String>,

    // === Rendering flags ===
    /// True when the screen needs to be redrawn
    pub needs_render: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            playing: false,
            started: false,
            fullscreen: false,
            show_transcript: false,
            speed_menu_open: false,
            captions_menu_open: false,
            pause_message: None,
            needs_render: true,
        }
    }

    /// Media started playing.
    pub fn on_play(&mut self) {
        self.playing = true;
        self.started = true;
        self.needs_render = true;
    }

    /// Media paused or ended.
    pub fn on_pause(&mut self) {
        self.playing = false;
        self.needs_render = true;
    }

    /// Toggle the transcript panel.
    pub fn toggle_transcript(&mut self) {
        self.show_transcript = !self.show_transcript;
        self.needs_render = true;
    }

    /// Toggle the speed menu; the captions menu closes.
    pub fn toggle_speed_menu(&mut self) {
        self.speed_menu_open = !self.speed_menu_open;
        self.captions_menu_open = false;
        self.needs_render = true;
    }

    /// Toggle the captions menu; the speed menu closes.
    pub fn toggle_captions_menu(&mut self) {
        self.captions_menu_open = !self.captions_menu_open;
        self.speed_menu_open = false;
        self.needs_render = true;
    }

    /// Close both menus (click outside them).
    pub fn close_menus(&mut self) {
        if self.speed_menu_open || self.captions_menu_open {
            self.speed_menu_open = false;
            self.captions_menu_open = false;
            self.needs_render = true;
        }
    }

    pub fn any_menu_open(&self) -> bool {
        self.speed_menu_open || self.captions_menu_open
    }

    pub fn show_pause_message(&mut self, message: &str) {
        self.pause_message = Some(message.to_string());
        self.needs_render = true;
    }

    /// Hide the pause message. Returns true if one was shown.
    pub fn dismiss_pause_message(&mut self) -> bool {
        let shown = self.pause_message.take().is_some();
        if shown {
            self.needs_render = true;
        }
        shown
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen != fullscreen {
            self.fullscreen = fullscreen;
            self.needs_render = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_correct_defaults() {
        let state = PlayerState::new();

        assert!(!state.playing);
        assert!(!state.started);
        assert!(!state.fullscreen);
        assert!(!state.show_transcript);
        assert!(!state.any_menu_open());
        assert!(state.pause_message.is_none());
        assert!(state.needs_render);
    }

    #[test]
    fn play_marks_started_and_pause_keeps_it() {
        let mut state = PlayerState::new();
        state.on_play();
        assert!(state.playing);
        assert!(state.started);

        state.on_pause();
        assert!(!state.playing);
        assert!(state.started);
    }

    #[test]
    fn menus_are_mutually_exclusive() {
        let mut state = PlayerState::new();
        state.toggle_speed_menu();
        assert!(state.speed_menu_open);

        state.toggle_captions_menu();
        assert!(state.captions_menu_open);
        assert!(!state.speed_menu_open);

        state.toggle_captions_menu();
        assert!(!state.any_menu_open());
    }

    #[test]
    fn close_menus_closes_both() {
        let mut state = PlayerState::new();
        state.speed_menu_open = true;
        state.captions_menu_open = true;
        state.needs_render = false;

        state.close_menus();
        assert!(!state.any_menu_open());
        assert!(state.needs_render);
    }

    #[test]
    fn close_menus_without_open_menu_does_not_redraw() {
        let mut state = PlayerState::new();
        state.needs_render = false;
        state.close_menus();
        assert!(!state.needs_render);
    }

    #[test]
    fn pause_message_lifecycle() {
        let mut state = PlayerState::new();
        state.show_pause_message("Discuss");
        assert_eq!(state.pause_message.as_deref(), Some("Discuss"));
        assert!(state.dismiss_pause_message());
        assert!(!state.dismiss_pause_message());
    }

    #[test]
    fn toggle_transcript_flips() {
        let mut state = PlayerState::new();
        state.toggle_transcript();
        assert!(state.show_transcript);
        state.toggle_transcript();
        assert!(!state.show_transcript);
    }

    #[test]
    fn input_result_enum_variants() {
        assert_eq!(InputResult::Continue, InputResult::Continue);
        assert_ne!(InputResult::Quit, InputResult::Continue);
    }
}
