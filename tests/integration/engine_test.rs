//! Integration tests for the annotation engine and caption selector

use cueplay::player::playback::{
    Cue, EffectPort, EventEngine, EventKind, PlaybackEvent, SubtitleSelector, SubtitleTrack,
};
use cueplay::player::render::progress_fraction;

use crate::helpers::load_payload;

/// Media element fake: applies effects the way a host would.
#[derive(Debug, Default)]
struct FakeMedia {
    time: f64,
    muted: bool,
    paused: bool,
    seeks: Vec<f64>,
    pauses: usize,
    messages: Vec<String>,
}

impl EffectPort for FakeMedia {
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pauses += 1;
    }

    fn seek(&mut self, time: f64) {
        self.time = time;
        self.seeks.push(time);
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

fn engine(events: Vec<PlaybackEvent>) -> EventEngine {
    let mut engine = EventEngine::new();
    engine.ingest(events);
    engine
}

/// Tick from `from` to `to` in quarter seconds, following seeks.
fn play(engine: &mut EventEngine, media: &mut FakeMedia, from: f64, to: f64) {
    media.time = from;
    while media.time <= to {
        let t = media.time;
        engine.on_tick(t, &mut *media);
        if media.time == t {
            media.time += 0.25;
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn mute_window_lifecycle() {
    let mut e = engine(vec![PlaybackEvent::mute(10.0, 20.0)]);
    let mut media = FakeMedia::default();

    e.on_tick(9.0, &mut media);
    assert!(!media.muted);

    e.on_tick(10.0, &mut media);
    assert!(media.muted);

    e.on_tick(21.0, &mut media);
    assert!(!media.muted);
    assert!(!e.events()[0].active);

    e.on_seek(5.0);
    assert!(e.events()[0].active);

    e.on_tick(11.0, &mut media);
    assert!(media.muted);
}

#[test]
fn skip_fires_once_and_does_not_rearm_itself() {
    let mut e = engine(vec![PlaybackEvent::skip(30.0, 45.0)]);
    let mut media = FakeMedia::default();

    e.on_tick(30.0, &mut media);
    assert_eq!(media.seeks, [45.0]);
    assert!(!e.events()[0].active);

    e.on_tick(46.0, &mut media);
    assert_eq!(media.seeks, [45.0]);
}

#[test]
fn each_event_fires_once_per_forward_pass() {
    let mut e = engine(vec![
        PlaybackEvent::mute(10.0, 20.0),
        PlaybackEvent::skip(30.0, 45.0),
        PlaybackEvent::pause(60.0).with_message("Discuss"),
    ]);
    let mut media = FakeMedia::default();
    play(&mut e, &mut media, 0.0, 90.0);

    assert_eq!(media.seeks, [45.0]);
    assert_eq!(media.pauses, 1);
    assert_eq!(media.messages, ["Discuss"]);
    assert!(!media.muted);
}

#[test]
fn rewind_then_replay_reproduces_annotations() {
    let mut e = engine(vec![
        PlaybackEvent::skip(30.0, 45.0),
        PlaybackEvent::pause(60.0),
    ]);
    let mut media = FakeMedia::default();
    play(&mut e, &mut media, 0.0, 70.0);

    e.on_seek(0.0);
    play(&mut e, &mut media, 0.0, 70.0);

    assert_eq!(media.seeks, [45.0, 45.0]);
    assert_eq!(media.pauses, 2);
}

#[test]
fn seek_past_window_does_not_rearm() {
    let mut e = engine(vec![PlaybackEvent::pause(60.0)]);
    let mut media = FakeMedia::default();
    e.on_tick(60.0, &mut media);

    e.on_seek(60.0);
    assert!(!e.events()[0].active);
    e.on_seek(61.0);
    assert!(!e.events()[0].active);
    e.on_seek(59.0);
    assert!(e.events()[0].active);
}

#[test]
fn events_keep_payload_order() {
    let mut e = engine(vec![
        PlaybackEvent::pause(60.0),
        PlaybackEvent::mute(10.0, 20.0),
    ]);
    let kinds: Vec<EventKind> = e.events().iter().map(|ev| ev.kind).collect();
    assert_eq!(kinds, [EventKind::Pause, EventKind::Mute]);

    // A later tick fires both windows in list order
    let mut media = FakeMedia::default();
    e.ingest(vec![PlaybackEvent::mute(0.0, 100.0), PlaybackEvent::pause(50.0)]);
    e.on_tick(50.0, &mut media);
    assert!(media.muted);
    assert_eq!(media.pauses, 1);
}

#[test]
fn caption_lookup() {
    let mut selector = SubtitleSelector::new(vec![SubtitleTrack::new(
        "en",
        vec![
            Cue::new(2.0, Some(4.0), "Hello"),
            Cue::new(10.0, None, "No end"),
        ],
    )]);
    assert!(selector.cue_for_time(3.0).is_none());

    assert!(selector.select_track(Some("en")));
    assert_eq!(selector.cue_for_time(3.0).map(|c| c.text.as_str()), Some("Hello"));
    assert!(selector.cue_for_time(5.0).is_none());
    assert_eq!(selector.cue_for_time(14.9).map(|c| c.text.as_str()), Some("No end"));
    assert!(selector.cue_for_time(15.1).is_none());

    selector.select_track(None);
    assert!(selector.cue_for_time(3.0).is_none());
}

#[test]
fn progress_is_zero_without_duration() {
    for t in [0.0, 1.0, 1e6] {
        assert_eq!(progress_fraction(t, Some(0.0)), 0.0);
        assert_eq!(progress_fraction(t, None), 0.0);
    }
}

// ============================================================================
// Payload to engine
// ============================================================================

#[test]
fn malformed_entries_are_skipped_individually() {
    let payload = load_payload("malformed_entries.json");
    let events = payload.parse_events();
    assert_eq!(events.items.len(), 2);
    assert_eq!(events.rejected.len(), 5);
    let indexes: Vec<usize> = events.items.iter().map(|e| e.index).collect();
    assert_eq!(indexes, [0, 6]);

    let mut e = engine(events.items);
    let mut media = FakeMedia::default();
    play(&mut e, &mut media, 0.0, 80.0);
    assert_eq!(media.pauses, 1);

    let tracks = payload.parse_subtitles();
    assert_eq!(tracks.items.len(), 1);
    assert_eq!(tracks.rejected.len(), 1);
    assert_eq!(tracks.items[0].cues.len(), 1);
    assert_eq!(tracks.items[0].cues[0].text, "good");
}
