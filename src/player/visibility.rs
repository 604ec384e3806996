//! Controls visibility state machine.
//!
//! Controls are shown while the pointer is over the player and has moved
//! recently, while the pointer is over the controls strip, and always while
//! playback is not running.

use std::time::{Duration, Instant};

use crate::timer::SingleShotTimer;

/// Default pointer idle time before controls hide.
pub const DEFAULT_INACTIVITY_DELAY: Duration = Duration::from_millis(3000);

/// Pure visibility rule.
pub fn controls_visible(
    hovering: bool,
    controls_hovering: bool,
    mouse_inactive: bool,
    playing: bool,
) -> bool {
    (hovering && !mouse_inactive) || controls_hovering || !playing
}

#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    /// Pointer is over the playback surface
    pub hovering: bool,
    /// Pointer is over the controls strip
    pub controls_hovering: bool,
    /// Pointer has been idle for the inactivity delay
    pub mouse_inactive: bool,
    inactivity: SingleShotTimer,
}

impl Default for ControlsVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_INACTIVITY_DELAY)
    }
}

impl ControlsVisibility {
    pub fn new(inactivity_delay: Duration) -> Self {
        Self {
            hovering: false,
            controls_hovering: false,
            mouse_inactive: false,
            inactivity: SingleShotTimer::new(inactivity_delay),
        }
    }

    /// Evaluate the rule for the given playing state.
    pub fn is_visible(&self, playing: bool) -> bool {
        controls_visible(
            self.hovering,
            self.controls_hovering,
            self.mouse_inactive,
            playing,
        )
    }

    /// Whether the pointer cursor should be hidden.
    pub fn cursor_hidden(&self) -> bool {
        self.mouse_inactive
    }

    /// Pointer moved: mark it active and restart the inactivity timer.
    pub fn on_pointer_move(&mut self, now: Instant) {
        self.mouse_inactive = false;
        self.inactivity.restart(now);
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn set_controls_hovering(&mut self, hovering: bool) {
        self.controls_hovering = hovering;
    }

    /// Advance the inactivity timer. Returns true if the pointer just went idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.inactivity.poll(now) {
            self.mouse_inactive = true;
            true
        } else {
            false
        }
    }

    pub fn timer_pending(&self) -> bool {
        self.inactivity.is_pending()
    }

    /// Time left before the pointer goes idle, if the timer is running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.inactivity.remaining(now)
    }

    pub fn teardown(&mut self) {
        self.inactivity.cancel();
    }
}
