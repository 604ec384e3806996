//! Integration tests for a playback session driven like the terminal host

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use cueplay::player::fullscreen::Fullscreen;
use cueplay::player::input::handle_event;
use cueplay::player::{InputResult, PlaybackSession, SessionOptions, SimulatedMedia, TimeSource};

use crate::helpers::load_payload;

const TERM: (u16, u16) = (80, 24);
const STEP: Duration = Duration::from_millis(250);

fn session() -> PlaybackSession<SimulatedMedia> {
    let mut session = PlaybackSession::new(
        SimulatedMedia::with_duration(120.0),
        load_payload("lesson.json"),
        Fullscreen::Unavailable,
        SessionOptions::default(),
    );
    session.on_metadata_loaded();
    session
}

/// Advance the media clock the way the host loop does, until `until` seconds
/// or until playback stops.
fn run_until(session: &mut PlaybackSession<SimulatedMedia>, until: f64) {
    while !session.media().is_paused() && session.media().current_time() < until {
        let ended = session.media_mut().advance(STEP);
        session.on_time_update();
        if ended {
            session.on_ended();
        }
    }
}

fn send(session: &mut PlaybackSession<SimulatedMedia>, event: Event) -> InputResult {
    let mut size = TERM;
    handle_event(event, session, &mut size, Instant::now())
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn full_pass_over_lesson() {
    let mut s = session();
    s.select_caption(Some("en"));
    s.play();

    run_until(&mut s, 3.0);
    assert_eq!(s.view().caption, "Hello");

    run_until(&mut s, 12.0);
    assert!(s.media().is_muted());
    assert_eq!(s.view().caption, "Are you coming to the harvest?");

    run_until(&mut s, 25.0);
    assert!(!s.media().is_muted());

    // Skip at 30 jumps to 45
    run_until(&mut s, 30.0);
    assert!(s.media().current_time() >= 45.0);

    // Pause at 60 stops playback with its message
    run_until(&mut s, 200.0);
    assert!(s.media().is_paused());
    assert!(!s.view().playing);
    assert_eq!(s.view().pause_message, Some("What does Maria decide here?"));
    assert!(s.view().controls_visible);

    // Resume plays to the end
    assert_eq!(send(&mut s, key(KeyCode::Enter)), InputResult::Continue);
    assert_eq!(s.view().pause_message, None);
    send(&mut s, key(KeyCode::Char(' ')));
    run_until(&mut s, 200.0);
    assert!(s.media().ended());
    assert_eq!(s.view().elapsed, "00:02:00");
    assert_eq!(s.view().progress, 1.0);
}

#[test]
fn start_over_replays_annotations() {
    let mut s = session();
    s.play();
    run_until(&mut s, 200.0);
    assert_eq!(s.state().pause_message.as_deref(), Some("What does Maria decide here?"));
    s.dismiss_pause_message();

    send(&mut s, key(KeyCode::Home));
    assert_eq!(s.media().current_time(), 0.0);
    s.play();
    run_until(&mut s, 200.0);
    assert!(s.media().is_paused());
    assert!(s.media().current_time() >= 60.0 && s.media().current_time() < 61.0);
}

#[test]
fn clicking_the_scrubber_seeks_and_rearms() {
    let mut s = session();
    s.play();
    run_until(&mut s, 200.0);
    assert!(s.media().is_paused());

    // Bar spans columns 1..61 on the second to last row; column 16 is 25%.
    // The click lands on the Skip start, which fires right away while paused.
    send(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 16, 22));
    assert_eq!(s.media().current_time(), 45.0);

    // Pause ends after 30 and is armed again; the Mute window ended at 20
    let active: Vec<bool> = s.engine().events().iter().map(|e| e.active).collect();
    assert_eq!(active, [false, false, true]);
}

#[test]
fn clicking_the_surface_toggles_playback_or_closes_menus() {
    let mut s = session();
    send(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 40, 5));
    assert!(s.view().playing);

    send(&mut s, key(KeyCode::Char('s')));
    assert!(s.view().speed_menu_open);
    send(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 40, 5));
    assert!(!s.view().speed_menu_open);
    assert!(s.view().playing);
}

#[test]
fn menus_pick_entries_by_number() {
    let mut s = session();
    send(&mut s, key(KeyCode::Char('s')));
    send(&mut s, key(KeyCode::Char('5')));
    assert_eq!(s.media().playback_rate(), 1.5);
    assert!(!s.view().speed_menu_open);

    send(&mut s, key(KeyCode::Char('l')));
    send(&mut s, key(KeyCode::Char('2')));
    assert_eq!(s.view().caption_language, Some("es"));

    send(&mut s, key(KeyCode::Char('l')));
    send(&mut s, key(KeyCode::Char('0')));
    assert_eq!(s.view().caption_language, None);
}

#[test]
fn rate_keys_from_terminal() {
    let mut s = session();
    send(
        &mut s,
        Event::Key(KeyEvent::new(KeyCode::Char('>'), KeyModifiers::SHIFT)),
    );
    assert_eq!(s.media().playback_rate(), 1.25);
    send(&mut s, key(KeyCode::Char('<')));
    send(&mut s, key(KeyCode::Char('<')));
    assert_eq!(s.media().playback_rate(), 0.75);
}

#[test]
fn escape_unwinds_before_quitting() {
    let mut s = session();
    send(&mut s, key(KeyCode::Char('l')));
    assert_eq!(send(&mut s, key(KeyCode::Esc)), InputResult::Continue);
    assert!(!s.view().captions_menu_open);
    assert_eq!(send(&mut s, key(KeyCode::Esc)), InputResult::Quit);
}

#[test]
fn focus_and_pointer_drive_controls_visibility() {
    let start = Instant::now();
    let mut s = session();
    s.play();
    let mut size = TERM;
    handle_event(Event::FocusGained, &mut s, &mut size, start);
    assert!(s.view().controls_visible);

    s.poll_timers(start + Duration::from_millis(3000));
    assert!(!s.view().controls_visible);

    // Moving over the controls strip shows them again
    handle_event(
        mouse(MouseEventKind::Moved, 10, 23),
        &mut s,
        &mut size,
        start + Duration::from_millis(3100),
    );
    assert!(s.view().controls_visible);

    handle_event(Event::FocusLost, &mut s, &mut size, start);
    s.poll_timers(start + Duration::from_secs(10));
    assert!(!s.view().controls_visible);
}

#[test]
fn pointer_over_the_picture_shows_controls_without_focus_events() {
    let start = Instant::now();
    let mut s = session();
    s.play();
    let mut size = TERM;

    handle_event(mouse(MouseEventKind::Moved, 10, 5), &mut s, &mut size, start);
    assert!(s.visibility().hovering);
    assert!(s.view().controls_visible);

    s.poll_timers(start + Duration::from_millis(3000));
    assert!(!s.view().controls_visible);

    handle_event(
        mouse(MouseEventKind::Moved, 12, 6),
        &mut s,
        &mut size,
        start + Duration::from_millis(3100),
    );
    assert!(s.view().controls_visible);
}

#[test]
fn scrub_drag_commits_on_release() {
    let start = Instant::now();
    let mut s = session();
    let mut size = TERM;
    handle_event(
        mouse(MouseEventKind::Drag(MouseButton::Left), 31, 22),
        &mut s,
        &mut size,
        start,
    );
    assert_eq!(s.view().scrub_preview, Some(60.0));
    assert_eq!(s.media().current_time(), 0.0);

    handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 31, 22), &mut s, &mut size, start);
    assert_eq!(s.media().current_time(), 60.0);
}
