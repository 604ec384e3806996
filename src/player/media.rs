//! Media playback primitives.
//!
//! `TimeSource` is the narrow view of the host's media element the player
//! needs. `SimulatedMedia` implements it with a clock advanced by the host
//! loop, which is what the terminal player and the tests use.

use std::time::Duration;

/// Host media element operations.
pub trait TimeSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback position.
    fn set_current_time(&mut self, time: f64);

    /// Total duration, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn play(&mut self);

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    fn set_playback_rate(&mut self, rate: f64);

    fn playback_rate(&self) -> f64;
}

/// Media clock advanced explicitly by the host loop.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    duration: Option<f64>,
    position: f64,
    paused: bool,
    ended: bool,
    muted: bool,
    rate: f64,
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self {
            duration: None,
            position: 0.0,
            paused: true,
            ended: false,
            muted: false,
            rate: 1.0,
        }
    }
}

impl SimulatedMedia {
    /// Media with metadata not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Media whose duration is already known.
    pub fn with_duration(duration: f64) -> Self {
        let mut media = Self::new();
        media.load_metadata(duration);
        media
    }

    /// Make the duration known.
    pub fn load_metadata(&mut self, duration: f64) {
        self.duration = Some(duration.max(0.0));
    }

    /// Whether playback ran into the end of the media.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Advance the clock by `elapsed` wall time, scaled by the playback rate.
    ///
    /// Returns true if the end of the media was reached during this step.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.paused {
            return false;
        }
        self.position += elapsed.as_secs_f64() * self.rate;
        match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                self.paused = true;
                self.ended = true;
                true
            }
            _ => false,
        }
    }
}

impl TimeSource for SimulatedMedia {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, time: f64) {
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = if time.is_finite() {
            time.clamp(0.0, upper)
        } else {
            0.0
        };
        self.ended = false;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn play(&mut self) {
        if self.ended {
            self.position = 0.0;
            self.ended = false;
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }
}
