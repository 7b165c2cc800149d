//! # Gesture Input Module
//!
//! Unified pointer input model for mouse and touch events.
//!
//! Hosts translate their native events into [`PointerEvent`]s. Mouse events
//! carry one position; touch events carry every active touch point, of
//! which only the first (primary) one is tracked.
//!
//! ## Coordinates
//!
//! All positions are viewport coordinates (`clientX` / `clientY` in a
//! browser). The travel zone's live bounding box is passed alongside each
//! move as a [`ZoneRect`], so the control can be resized or moved between
//! drags.

use crate::geometry::Offset;

/// One touch contact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// A pointer event from the host, mouse or touch.
///
/// # Examples
///
/// ```
/// use ptz_joystick::gesture::{PointerEvent, TouchPoint};
///
/// let mouse = PointerEvent::mouse(10.0, 20.0);
/// assert_eq!(mouse.position(), Some((10.0, 20.0)));
///
/// let touch = PointerEvent::touch(vec![TouchPoint::new(1.0, 2.0), TouchPoint::new(9.0, 9.0)]);
/// assert_eq!(touch.position(), Some((1.0, 2.0)));
///
/// let lifted = PointerEvent::touch(Vec::new());
/// assert_eq!(lifted.position(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Mouse { client_x: f64, client_y: f64 },
    Touch { touches: Vec<TouchPoint> },
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self::Mouse { client_x, client_y }
    }

    #[must_use]
    pub fn touch(touches: Vec<TouchPoint>) -> Self {
        Self::Touch { touches }
    }

    /// Position of the primary pointer, or `None` if the event carries no
    /// usable coordinates.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        let (x, y) = match self {
            Self::Mouse { client_x, client_y } => (*client_x, *client_y),
            Self::Touch { touches } => {
                let primary = touches.first()?;
                (primary.client_x, primary.client_y)
            }
        };

        (x.is_finite() && y.is_finite()).then_some((x, y))
    }
}

/// Bounding box of the travel zone in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ZoneRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Geometric center of the box.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Offset of a viewport position from the box center.
    ///
    /// # Examples
    ///
    /// ```
    /// use ptz_joystick::gesture::ZoneRect;
    /// use ptz_joystick::geometry::Offset;
    ///
    /// let rect = ZoneRect::new(100.0, 50.0, 180.0, 180.0);
    /// assert_eq!(rect.offset_of(270.0, 140.0), Offset::new(80.0, 0.0));
    /// ```
    #[must_use]
    pub fn offset_of(&self, client_x: f64, client_y: f64) -> Offset {
        let (center_x, center_y) = self.center();
        Offset::new(client_x - center_x, client_y - center_y)
    }
}

/// Host instruction returned from pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerClaim {
    /// The widget owns this pointer; suppress default drag/scroll.
    Claimed,
    /// Not handled; let the host do its default processing.
    Ignored,
}

impl PointerClaim {
    #[must_use]
    pub fn prevent_default(&self) -> bool {
        matches!(self, Self::Claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_position() {
        assert_eq!(PointerEvent::mouse(3.5, -2.0).position(), Some((3.5, -2.0)));
    }

    #[test]
    fn test_touch_primary_only() {
        let event = PointerEvent::touch(vec![
            TouchPoint::new(10.0, 20.0),
            TouchPoint::new(300.0, 400.0),
        ]);
        assert_eq!(event.position(), Some((10.0, 20.0)));
    }

    #[test]
    fn test_touch_without_points() {
        assert_eq!(PointerEvent::touch(vec![]).position(), None);
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert_eq!(PointerEvent::mouse(f64::NAN, 0.0).position(), None);
        assert_eq!(PointerEvent::mouse(0.0, f64::INFINITY).position(), None);
        assert_eq!(
            PointerEvent::touch(vec![TouchPoint::new(f64::NAN, 1.0)]).position(),
            None
        );
    }

    #[test]
    fn test_zone_rect_center() {
        let rect = ZoneRect::new(10.0, 20.0, 140.0, 200.0);
        assert_eq!(rect.center(), (80.0, 120.0));
    }

    #[test]
    fn test_zone_rect_offset() {
        let rect = ZoneRect::new(0.0, 0.0, 180.0, 180.0);
        assert_eq!(rect.offset_of(90.0, 90.0), Offset::ZERO);
        assert_eq!(rect.offset_of(0.0, 180.0), Offset::new(-90.0, 90.0));
    }

    #[test]
    fn test_pointer_claim() {
        assert!(PointerClaim::Claimed.prevent_default());
        assert!(!PointerClaim::Ignored.prevent_default());
    }
}
