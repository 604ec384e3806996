//! Letterbox geometry for the picture overlay.
//!
//! Captions and pause messages are placed over the visible picture rather
//! than the whole container, so the overlay follows the letterboxed frame.

/// Aspect ratio of the picture (width / height).
pub const VIDEO_ASPECT: f64 = 16.0 / 9.0;

/// Axis-aligned rectangle in container units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest rectangle of the given aspect that fits centered in the container.
pub fn letterbox(container_width: f64, container_height: f64, aspect: f64) -> Rect {
    if container_width <= 0.0 || container_height <= 0.0 || aspect <= 0.0 {
        return Rect::default();
    }

    if container_width / container_height > aspect {
        // Container is wider: bars left and right
        let width = container_height * aspect;
        Rect {
            x: (container_width - width) / 2.0,
            y: 0.0,
            width,
            height: container_height,
        }
    } else {
        // Container is taller: bars top and bottom
        let height = container_width / aspect;
        Rect {
            x: 0.0,
            y: (container_height - height) / 2.0,
            width: container_width,
            height,
        }
    }
}

/// Overlay rectangle for a 16:9 picture.
pub fn overlay_rect(container_width: f64, container_height: f64) -> Rect {
    letterbox(container_width, container_height, VIDEO_ASPECT)
}
