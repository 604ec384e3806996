//! Fullscreen capability.
//!
//! Hosts differ in whether and how they can go fullscreen. The capability is
//! resolved once when the session is built; without one, toggling is a no-op.

use std::fmt;
use std::io::{self, Write};

/// A host mechanism for entering and leaving fullscreen.
pub trait FullscreenBackend {
    fn request(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;
}

/// Fullscreen support detected for the host.
pub enum Fullscreen {
    Available(Box<dyn FullscreenBackend>),
    Unavailable,
}

impl fmt::Debug for Fullscreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Fullscreen::Available"),
            Self::Unavailable => f.write_str("Fullscreen::Unavailable"),
        }
    }
}

impl Fullscreen {
    pub fn available(backend: impl FullscreenBackend + 'static) -> Self {
        Self::Available(Box::new(backend))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Switch away from `is_fullscreen` and return the resulting state.
    ///
    /// The state is unchanged when the capability is missing or the backend
    /// reports an error.
    pub fn toggle(&mut self, is_fullscreen: bool) -> bool {
        let backend = match self {
            Self::Available(backend) => backend,
            Self::Unavailable => {
                tracing::debug!("fullscreen not supported by host, ignoring toggle");
                return is_fullscreen;
            }
        };

        let result = if is_fullscreen {
            backend.exit()
        } else {
            backend.request()
        };

        match result {
            Ok(()) => !is_fullscreen,
            Err(e) => {
                tracing::warn!(error = %e, "fullscreen toggle failed");
                is_fullscreen
            }
        }
    }
}

/// Maximizes the terminal window using the xterm window-manipulation sequence.
///
/// Only honored by xterm-compatible terminals; others ignore it silently.
pub struct XtermFullscreen<W: Write> {
    out: W,
}

impl<W: Write> XtermFullscreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn send(&mut self, sequence: &str) -> io::Result<()> {
        self.out.write_all(sequence.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> FullscreenBackend for XtermFullscreen<W> {
    fn request(&mut self) -> io::Result<()> {
        self.send("\x1b[9;1t")
    }

    fn exit(&mut self) -> io::Result<()> {
        self.send("\x1b[9;0t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Failing;

    impl FullscreenBackend for Failing {
        fn request(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "denied"))
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unavailable_toggle_is_noop() {
        let mut fs = Fullscreen::Unavailable;
        assert!(!fs.is_available());
        assert!(!fs.toggle(false));
        assert!(fs.toggle(true));
    }

    #[test]
    fn failing_backend_keeps_state() {
        let mut fs = Fullscreen::available(Failing);
        assert!(!fs.toggle(false));
        assert!(!fs.toggle(true));
    }

    #[test]
    fn xterm_backend_writes_sequences() {
        let buf = SharedBuf::default();
        let mut fs = Fullscreen::available(XtermFullscreen::new(buf.clone()));

        assert!(fs.toggle(false));
        assert!(!fs.toggle(true));
        let written = String::from_utf8(buf.0.borrow().clone()).unwrap();
        assert_eq!(written, "\x1b[9;1t\x1b[9;0t");
    }
}
