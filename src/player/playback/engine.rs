//! Annotation event engine.
//!
//! Matches the playback clock against the annotated intervals and fires each
//! interval's side effect once per forward pass. The clock can also move
//! backwards (seeking), which re-arms the intervals still ahead of the new
//! position so a replay reproduces the same behavior.
//!
//! # Per-event lifecycle
//!
//! ```text
//! Armed --(clock enters window)--> Fired
//! Fired --(seek to a time before the window end)--> Armed
//! ```
//!
//! A Mute event stays armed while the clock is inside its window and is
//! deactivated (with the audio unmuted) once the clock passes its end. Pause
//! and Skip events deactivate as soon as they fire and stay that way until a
//! seek re-arms them.
//!
//! Every tick scans all events in payload order. Annotation counts per video
//! are small; should that change, sorting by start and sweeping with a cursor
//! would make ticks sublinear without changing any of the rules above.

use super::event::{EventKind, PlaybackEvent};

/// Side effects the engine drives on the host.
pub trait EffectPort {
    /// Mute or unmute audio.
    fn set_muted(&mut self, muted: bool);

    /// Pause playback.
    fn pause(&mut self);

    /// Move the playback position.
    fn seek(&mut self, time: f64);

    /// Show the message attached to a Pause event.
    fn show_message(&mut self, message: &str);
}

/// Owns the session's annotated intervals and the engine-level mute flag.
#[derive(Debug, Default)]
pub struct EventEngine {
    events: Vec<PlaybackEvent>,
    muted: bool,
}

impl EventEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the session's events in the given order, all armed.
    pub fn ingest(&mut self, events: impl IntoIterator<Item = PlaybackEvent>) {
        self.events = events
            .into_iter()
            .map(|mut event| {
                event.active = true;
                event
            })
            .collect();
        self.muted = false;
        tracing::debug!(count = self.events.len(), "ingested annotation events");
    }

    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the engine currently holds the audio muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Evaluate every armed event against the playback clock.
    pub fn on_tick(&mut self, current_time: f64, port: &mut dyn EffectPort) {
        if !current_time.is_finite() {
            tracing::warn!(current_time, "ignoring tick with non-finite time");
            return;
        }

        // Index loop: a Skip re-arms other events mid-scan.
        for i in 0..self.events.len() {
            let event = &self.events[i];
            if !event.active {
                continue;
            }

            if event.contains(current_time) {
                self.fire(i, port);
            } else if current_time > event.effective_end()
                && event.kind == EventKind::Mute
                && self.muted
            {
                self.muted = false;
                port.set_muted(false);
                self.events[i].active = false;
                tracing::debug!(index = self.events[i].index, "mute window ended");
            }
        }
    }

    /// Re-arm every fired event whose window ends after `time`.
    pub fn on_seek(&mut self, time: f64) {
        for event in &mut self.events {
            if !event.active && time < event.effective_end() {
                event.active = true;
                tracing::trace!(index = event.index, time, "re-armed event");
            }
        }
    }

    fn fire(&mut self, i: usize, port: &mut dyn EffectPort) {
        let event = &mut self.events[i];
        tracing::debug!(index = event.index, kind = %event.kind, start = event.start, "event fired");

        match event.kind {
            EventKind::Mute => {
                if !self.muted {
                    self.muted = true;
                    port.set_muted(true);
                }
            }
            EventKind::Pause => {
                event.active = false;
                port.pause();
                if let Some(message) = event.message.as_deref() {
                    port.show_message(message);
                }
            }
            EventKind::Skip => {
                event.active = false;
                let target = event.effective_end();
                port.seek(target);
                self.on_seek(target);
            }
        }
    }
}
