//! Playback session.
//!
//! `PlaybackSession` wires one media element to the annotation engine, the
//! caption selector, the controls visibility state machine and the UI state.
//! Hosts forward their notifications (metadata loaded, time advanced,
//! play/pause, pointer and key input) to it and render from `view()`.
//!
//! Everything runs on the host's UI thread. Each method applies its input
//! completely before returning; seeks write the media position and reconcile
//! the engine back-to-back.

use std::time::{Duration, Instant};

use crate::config::PlayerConfig;
use crate::payload::AnnotationPayload;
use crate::player::fullscreen::Fullscreen;
use crate::player::input::keyboard::{map_key, step_rate, KeyAction, KeyInput, KeyOutcome, SeekSteps};
use crate::player::media::TimeSource;
use crate::player::playback::{EffectPort, EventEngine, SubtitleSelector};
use crate::player::render::progress::{
    format_elapsed, progress_fraction, seek_time_from_pointer, skip_regions, SkipRegion,
};
use crate::player::state::PlayerState;
use crate::player::visibility::ControlsVisibility;
use crate::timer::SingleShotTimer;

/// Tunables for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub inactivity_delay: Duration,
    pub scrub_debounce: Duration,
    pub seek_steps: SeekSteps,
    /// Caption language selected when metadata loads
    pub default_language: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&PlayerConfig::default())
    }
}

impl From<&PlayerConfig> for SessionOptions {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            inactivity_delay: Duration::from_millis(config.inactivity_delay_ms),
            scrub_debounce: Duration::from_millis(config.scrub_debounce_ms),
            seek_steps: SeekSteps {
                coarse: config.seek_step,
                fine: config.fine_seek_step,
            },
            default_language: config.default_language.clone(),
        }
    }
}

/// Everything a host needs to draw the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView<'a> {
    /// Elapsed time as HH:MM:SS
    pub elapsed: String,
    /// Duration as HH:MM:SS (`00:00:00` until known)
    pub total: String,
    /// Played fraction in [0, 1]
    pub progress: f64,
    /// Active caption text, empty when none
    pub caption: &'a str,
    /// Index of the active cue in the selected track
    pub cue_index: Option<usize>,
    pub caption_language: Option<&'a str>,
    pub controls_visible: bool,
    pub cursor_hidden: bool,
    pub playing: bool,
    pub started: bool,
    pub muted: bool,
    pub playback_rate: f64,
    pub fullscreen: bool,
    pub show_transcript: bool,
    pub speed_menu_open: bool,
    pub captions_menu_open: bool,
    pub pause_message: Option<&'a str>,
    pub skip_regions: &'a [SkipRegion],
    /// Position being previewed by a scrub drag
    pub scrub_preview: Option<f64>,
}

/// Engine effects applied to the media element and UI state.
struct MediaEffects<'a, M: TimeSource> {
    media: &'a mut M,
    state: &'a mut PlayerState,
}

impl<M: TimeSource> EffectPort for MediaEffects<'_, M> {
    fn set_muted(&mut self, muted: bool) {
        self.media.set_muted(muted);
        self.state.needs_render = true;
    }

    fn pause(&mut self) {
        self.media.pause();
        self.state.on_pause();
    }

    fn seek(&mut self, time: f64) {
        self.media.set_current_time(time);
        self.state.needs_render = true;
    }

    fn show_message(&mut self, message: &str) {
        self.state.show_pause_message(message);
    }
}

/// One playback session over a media element.
#[derive(Debug)]
pub struct PlaybackSession<M: TimeSource> {
    media: M,
    payload: AnnotationPayload,
    engine: EventEngine,
    subtitles: SubtitleSelector,
    visibility: ControlsVisibility,
    state: PlayerState,
    fullscreen: Fullscreen,
    skip_regions: Vec<SkipRegion>,
    scrub: SingleShotTimer,
    scrub_target: Option<f64>,
    options: SessionOptions,
    loaded: bool,
}

impl<M: TimeSource> PlaybackSession<M> {
    /// Create a session. Annotations are loaded on `on_metadata_loaded`.
    pub fn new(
        media: M,
        payload: AnnotationPayload,
        fullscreen: Fullscreen,
        options: SessionOptions,
    ) -> Self {
        let mut state = PlayerState::new();
        if !media.is_paused() {
            state.on_play();
        }
        Self {
            media,
            payload,
            engine: EventEngine::new(),
            subtitles: SubtitleSelector::default(),
            visibility: ControlsVisibility::new(options.inactivity_delay),
            state,
            fullscreen,
            skip_regions: Vec::new(),
            scrub: SingleShotTimer::new(options.scrub_debounce),
            scrub_target: None,
            options,
            loaded: false,
        }
    }

    // === Accessors ===

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn engine(&self) -> &EventEngine {
        &self.engine
    }

    pub fn subtitles(&self) -> &SubtitleSelector {
        &self.subtitles
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    pub fn visibility(&self) -> &ControlsVisibility {
        &self.visibility
    }

    pub fn skip_regions(&self) -> &[SkipRegion] {
        &self.skip_regions
    }

    pub fn title(&self) -> Option<&str> {
        self.payload.title.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn controls_visible(&self) -> bool {
        self.visibility.is_visible(self.state.playing)
    }

    // === Media notifications ===

    /// Duration became known: load annotations, captions and skip regions.
    ///
    /// Runs once per session; later calls are ignored.
    pub fn on_metadata_loaded(&mut self) {
        if self.loaded {
            tracing::debug!("metadata already loaded, ignoring");
            return;
        }
        self.loaded = true;

        let events = self.payload.parse_events();
        self.engine.ingest(events.items);

        let tracks = self.payload.parse_subtitles();
        self.subtitles = SubtitleSelector::new(tracks.items);
        if let Some(language) = self.options.default_language.clone() {
            self.subtitles.select_track(Some(&language));
        }

        let duration = self.media.duration();
        if duration.is_none() {
            tracing::warn!("metadata loaded without a duration, skip regions disabled");
        }
        self.skip_regions = skip_regions(self.engine.events(), duration);

        tracing::info!(
            events = self.engine.len(),
            rejected_events = events.rejected.len(),
            tracks = self.subtitles.languages().count(),
            duration = ?duration,
            "annotations loaded"
        );
        self.state.needs_render = true;
    }

    /// Playback position advanced: fire annotations for the new time.
    pub fn on_time_update(&mut self) {
        let current_time = self.media.current_time();
        let mut effects = MediaEffects {
            media: &mut self.media,
            state: &mut self.state,
        };
        self.engine.on_tick(current_time, &mut effects);
        self.state.needs_render = true;
    }

    pub fn on_play(&mut self) {
        self.state.on_play();
    }

    pub fn on_pause(&mut self) {
        self.state.on_pause();
    }

    pub fn on_ended(&mut self) {
        self.state.on_pause();
    }

    // === Playback control ===

    pub fn play(&mut self) {
        let before = self.media.current_time();
        self.media.play();
        // Replaying after the end rewinds the media
        let after = self.media.current_time();
        if after < before {
            self.engine.on_seek(after);
        }
        self.state.on_play();
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.state.on_pause();
    }

    pub fn toggle_play(&mut self) {
        if self.state.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek to `time`, clamped to the media, and re-arm annotations ahead of it.
    ///
    /// Annotations at the new position apply at once, also while paused.
    pub fn seek(&mut self, time: f64) {
        let upper = self.media.duration().unwrap_or(f64::INFINITY);
        let time = if time.is_finite() {
            time.clamp(0.0, upper)
        } else {
            0.0
        };

        self.scrub.cancel();
        self.scrub_target = None;

        self.media.set_current_time(time);
        self.engine.on_seek(time);
        tracing::debug!(time, "seek");
        self.on_time_update();
    }

    pub fn seek_by(&mut self, delta: f64) {
        let target = self.media.current_time() + delta;
        self.seek(target);
    }

    pub fn start_over(&mut self) {
        self.seek(0.0);
    }

    /// Seek to the time under a click on the scrubber.
    pub fn seek_from_pointer(&mut self, offset: f64, width: f64) {
        let time = seek_time_from_pointer(offset, width, self.media.duration());
        self.seek(time);
    }

    /// Preview the time under a scrubber drag; the seek commits once the
    /// pointer rests for the scrub debounce delay.
    pub fn scrub_to_pointer(&mut self, offset: f64, width: f64, now: Instant) {
        let time = seek_time_from_pointer(offset, width, self.media.duration());
        self.scrub_target = Some(time);
        self.scrub.restart(now);
        self.state.needs_render = true;
    }

    /// Commit a pending scrub immediately (pointer released).
    pub fn commit_scrub(&mut self) {
        if let Some(time) = self.scrub_target.take() {
            self.seek(time);
        }
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.media.set_playback_rate(rate);
        self.state.speed_menu_open = false;
        self.state.needs_render = true;
    }

    /// Step the playback rate along the ladder. Returns false at the ends.
    pub fn step_rate(&mut self, up: bool) -> bool {
        match step_rate(self.media.playback_rate(), up) {
            Some(rate) => {
                self.set_playback_rate(rate);
                true
            }
            None => false,
        }
    }

    // === Captions and panels ===

    /// Select a caption language (`None` or `"off"` turns captions off).
    pub fn select_caption(&mut self, language: Option<&str>) -> bool {
        let found = self.subtitles.select_track(language);
        self.state.captions_menu_open = false;
        self.state.needs_render = true;
        found
    }

    pub fn toggle_transcript(&mut self) {
        self.state.toggle_transcript();
    }

    pub fn toggle_speed_menu(&mut self) {
        self.state.toggle_speed_menu();
    }

    pub fn toggle_captions_menu(&mut self) {
        self.state.toggle_captions_menu();
    }

    pub fn close_menus(&mut self) {
        self.state.close_menus();
    }

    pub fn dismiss_pause_message(&mut self) -> bool {
        self.state.dismiss_pause_message()
    }

    pub fn toggle_fullscreen(&mut self) {
        let fullscreen = self.fullscreen.toggle(self.state.fullscreen);
        self.state.set_fullscreen(fullscreen);
    }

    /// The host left fullscreen on its own (e.g. the user pressed its exit key).
    pub fn on_fullscreen_exited(&mut self) {
        self.state.set_fullscreen(false);
    }

    // === Pointer ===

    pub fn on_pointer_move(&mut self, now: Instant) {
        let was_visible = self.controls_visible();
        self.visibility.on_pointer_move(now);
        if self.controls_visible() != was_visible {
            self.state.needs_render = true;
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.visibility.set_hovering(hovering);
        self.state.needs_render = true;
    }

    pub fn set_controls_hovering(&mut self, hovering: bool) {
        if self.visibility.controls_hovering != hovering {
            self.visibility.set_controls_hovering(hovering);
            self.state.needs_render = true;
        }
    }

    // === Keyboard ===

    /// Dispatch a key press. The outcome tells the host whether to suppress
    /// the key's default action.
    pub fn handle_key(&mut self, input: KeyInput) -> KeyOutcome {
        let Some(action) = map_key(input, &self.options.seek_steps) else {
            return KeyOutcome::ignored();
        };

        match action {
            KeyAction::SeekBy(delta) => self.seek_by(delta),
            KeyAction::RateUp => {
                self.step_rate(true);
            }
            KeyAction::RateDown => {
                self.step_rate(false);
            }
            KeyAction::TogglePlay => self.toggle_play(),
            KeyAction::ToggleFullscreen => self.toggle_fullscreen(),
            KeyAction::ToggleTranscript => self.toggle_transcript(),
        }
        KeyOutcome::handled(action)
    }

    // === Timers ===

    /// Fire expired timers. Hosts call this from their loop.
    pub fn poll_timers(&mut self, now: Instant) {
        if self.visibility.poll(now) {
            self.state.needs_render = true;
        }
        if self.scrub.poll(now) {
            self.commit_scrub();
        }
    }

    /// Earliest pending timer deadline, for hosts that sleep between events.
    pub fn next_timer_in(&self, now: Instant) -> Option<Duration> {
        match (self.scrub.remaining(now), self.visibility.remaining(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel pending timers; the session accepts no further timer work.
    pub fn teardown(&mut self) {
        self.visibility.teardown();
        self.scrub.cancel();
        self.scrub_target = None;
        tracing::debug!("session torn down");
    }

    // === Output ===

    pub fn view(&self) -> PlayerView<'_> {
        let current_time = self.media.current_time();
        let duration = self.media.duration();
        let cue = self.subtitles.cue_for_time(current_time);

        PlayerView {
            elapsed: format_elapsed(current_time),
            total: format_elapsed(duration.unwrap_or(0.0)),
            progress: progress_fraction(current_time, duration),
            caption: cue.map(|c| c.text.as_str()).unwrap_or(""),
            cue_index: self.subtitles.cue_index_for_time(current_time),
            caption_language: self.subtitles.active_language(),
            controls_visible: self.controls_visible(),
            cursor_hidden: self.visibility.cursor_hidden(),
            playing: self.state.playing,
            started: self.state.started,
            muted: self.media.is_muted(),
            playback_rate: self.media.playback_rate(),
            fullscreen: self.state.fullscreen,
            show_transcript: self.state.show_transcript,
            speed_menu_open: self.state.speed_menu_open,
            captions_menu_open: self.state.captions_menu_open,
            pause_message: self.state.pause_message.as_deref(),
            skip_regions: &self.skip_regions,
            scrub_preview: self.scrub_target,
        }
    }
}
