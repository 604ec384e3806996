//! Terminal host for the annotated player.
//!
//! Runs a `PlaybackSession` over `SimulatedMedia` in the alternate screen:
//! crossterm events feed the session, the media clock advances with wall
//! time, and the frame is redrawn when the session asks for it.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event,
    },
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::config::{FullscreenMode, PlayerConfig};
use crate::payload::AnnotationPayload;
use crate::player::error::PlayerError;
use crate::player::fullscreen::{Fullscreen, XtermFullscreen};
use crate::player::input::handle_event;
use crate::player::media::{SimulatedMedia, TimeSource};
use crate::player::render::{render_frame, MIN_COLS, MIN_ROWS};
use crate::player::session::{PlaybackSession, SessionOptions};
use crate::player::state::InputResult;

/// Upper bound on the wait for input between clock updates.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackResult {
    /// The user quit; position in seconds when they did
    Quit { position: f64 },
    /// The media played to its end and the user quit afterwards
    Finished,
}

/// Options for one playback run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Media length in seconds
    pub duration: f64,
    /// Caption language to start with, overriding the config
    pub language: Option<String>,
    /// Initial playback rate
    pub rate: Option<f64>,
    /// Start playing immediately
    pub autoplay: bool,
}

/// Source of terminal events so the loop can run without a tty.
pub trait EventSource {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Events read from the terminal.
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Restores the terminal on drop, including on early returns.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            Show,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Build the session for a payload.
pub fn build_session(
    payload: AnnotationPayload,
    config: &PlayerConfig,
    options: &PlayOptions,
) -> PlaybackSession<SimulatedMedia> {
    let fullscreen = match config.fullscreen {
        FullscreenMode::Xterm => Fullscreen::available(XtermFullscreen::new(io::stdout())),
        FullscreenMode::None => Fullscreen::Unavailable,
    };

    let mut session_options = SessionOptions::from(config);
    if options.language.is_some() {
        session_options.default_language = options.language.clone();
    }

    let mut session = PlaybackSession::new(
        SimulatedMedia::new(),
        payload,
        fullscreen,
        session_options,
    );
    session.media_mut().load_metadata(options.duration);
    session.on_metadata_loaded();

    if let Some(rate) = options.rate {
        session.set_playback_rate(rate);
    }
    if options.autoplay {
        session.play();
    }
    session
}

/// Play a payload in the terminal until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_session(
    payload: AnnotationPayload,
    config: &PlayerConfig,
    options: &PlayOptions,
) -> Result<PlaybackResult, PlayerError> {
    let term_size = terminal::size()
        .map_err(|e| PlayerError::Setup(format!("cannot read terminal size: {}", e)))?;
    check_terminal_size(term_size)?;

    let mut session = build_session(payload, config, options);
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let result = run_loop(
        &mut session,
        &mut CrosstermEventSource,
        &mut stdout,
        term_size,
    );
    session.teardown();
    result
}

/// Refuse terminals too small to lay out the player.
pub fn check_terminal_size((cols, rows): (u16, u16)) -> Result<(), PlayerError> {
    if cols < MIN_COLS || rows < MIN_ROWS {
        return Err(PlayerError::Setup(format!(
            "terminal is {}x{}, need at least {}x{}",
            cols, rows, MIN_COLS, MIN_ROWS
        )));
    }
    Ok(())
}

/// Drive a session until the user quits.
pub fn run_loop<W: Write>(
    session: &mut PlaybackSession<SimulatedMedia>,
    source: &mut dyn EventSource,
    out: &mut W,
    mut term_size: (u16, u16),
) -> Result<PlaybackResult, PlayerError> {
    let mut last_tick = Instant::now();
    session.state_mut().needs_render = true;

    loop {
        if session.state().needs_render {
            render_frame(out, session, term_size.0, term_size.1).map_err(PlayerError::Render)?;
            out.flush()?;
            session.state_mut().needs_render = false;
        }

        let now = Instant::now();
        let timeout = session
            .next_timer_in(now)
            .map_or(FRAME_INTERVAL, |t| t.min(FRAME_INTERVAL));

        if let Some(event) = source.next(timeout)? {
            let now = Instant::now();
            if handle_event(event, session, &mut term_size, now) == InputResult::Quit {
                break;
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_tick);
        last_tick = now;

        if !session.media().is_paused() {
            let ended = session.media_mut().advance(elapsed);
            session.on_time_update();
            if ended {
                tracing::info!("playback reached the end");
                session.on_ended();
            }
        }
        session.poll_timers(now);
    }

    let result = if session.media().ended() {
        PlaybackResult::Finished
    } else {
        PlaybackResult::Quit {
            position: session.media().current_time(),
        }
    };
    tracing::info!(?result, "player closed");
    Ok(result)
}
