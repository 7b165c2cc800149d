//! # Geometry Module
//!
//! Travel zone geometry and offset clamping.
//!
//! The handle moves inside a travel zone whose shape is fixed by
//! configuration. Raw pointer offsets (relative to the zone center) are
//! clamped into the allowed region before they are rendered or mapped to
//! commands.
//!
//! ## Travel Limits
//!
//! The handle must stay fully inside the zone's inner edge, so the maximum
//! distance of the handle center from the zone center is:
//!
//! ```text
//! limit = (dimension - 2 * border - handle_size) / 2
//! ```
//!
//! ## Shapes
//!
//! | Shape | Clamp | Axes |
//! |-------|-------|------|
//! | Rectangle | per-axis `[-limit_x, limit_x]`, `[-limit_y, limit_y]` | decoupled, corners reachable |
//! | Circle | radial, scaled back onto the boundary circle | coupled, direction preserved |
//!
//! ## Usage
//!
//! ```
//! use ptz_joystick::geometry::{Offset, TravelZone};
//!
//! let zone = TravelZone::circle(180.0, 70.0, 2.0)?;
//! assert_eq!(zone.limit_x(), 53.0);
//!
//! let clamped = zone.clamp(Offset::new(60.0, 60.0));
//! assert!((clamped.magnitude() - 53.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::{ZoneConfig, ZoneShape};
use crate::error::{JoystickError, Result};

/// Handle offset relative to the zone center.
///
/// Screen convention: `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// Neutral offset (handle centered).
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from the zone center.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Computes the travel limit along one dimension of the zone.
///
/// # Examples
///
/// ```
/// use ptz_joystick::geometry::travel_limit;
///
/// assert_eq!(travel_limit(180.0, 4.0, 70.0), 51.0);
/// assert_eq!(travel_limit(180.0, 2.0, 70.0), 53.0);
/// ```
#[inline]
#[must_use]
pub fn travel_limit(dimension: f64, border: f64, handle_size: f64) -> f64 {
    (dimension - 2.0 * border - handle_size) / 2.0
}

/// Allowed travel region of the handle.
///
/// Limits are derived once at construction and are always finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelZone {
    /// Independent per-axis limits.
    Rectangle { limit_x: f64, limit_y: f64 },
    /// Single radial limit.
    Circle { limit: f64 },
}

impl TravelZone {
    /// Builds a rectangular travel zone.
    ///
    /// # Errors
    ///
    /// Returns [`JoystickError::InvalidGeometry`] if a dimension is not
    /// positive or the handle and border do not fit.
    pub fn rectangle(width: f64, height: f64, handle_size: f64, border: f64) -> Result<Self> {
        let limit_x = checked_limit("width", width, border, handle_size)?;
        let limit_y = checked_limit("height", height, border, handle_size)?;
        Ok(Self::Rectangle { limit_x, limit_y })
    }

    /// Builds a circular travel zone from the disc diameter.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TravelZone::rectangle`].
    pub fn circle(diameter: f64, handle_size: f64, border: f64) -> Result<Self> {
        let limit = checked_limit("diameter", diameter, border, handle_size)?;
        Ok(Self::Circle { limit })
    }

    /// Builds the travel zone described by the configuration.
    ///
    /// A circular zone uses the smaller of `width` and `height` as its
    /// diameter.
    pub fn from_config(zone: &ZoneConfig) -> Result<Self> {
        match zone.shape {
            ZoneShape::Rectangle => {
                Self::rectangle(zone.width, zone.height, zone.handle_size, zone.border)
            }
            ZoneShape::Circle => {
                for (name, value) in [("width", zone.width), ("height", zone.height)] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(JoystickError::InvalidGeometry(format!(
                            "zone {} must be greater than 0 (got {})",
                            name, value
                        )));
                    }
                }
                Self::circle(zone.width.min(zone.height), zone.handle_size, zone.border)
            }
        }
    }

    /// Horizontal travel limit.
    #[must_use]
    pub fn limit_x(&self) -> f64 {
        match *self {
            Self::Rectangle { limit_x, .. } => limit_x,
            Self::Circle { limit } => limit,
        }
    }

    /// Vertical travel limit.
    #[must_use]
    pub fn limit_y(&self) -> f64 {
        match *self {
            Self::Rectangle { limit_y, .. } => limit_y,
            Self::Circle { limit } => limit,
        }
    }

    /// Clamps a raw offset into the travel zone.
    ///
    /// Non-finite input resolves to [`Offset::ZERO`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ptz_joystick::geometry::{Offset, TravelZone};
    ///
    /// let zone = TravelZone::rectangle(180.0, 180.0, 70.0, 2.0)?;
    /// assert_eq!(zone.clamp(Offset::new(80.0, -80.0)), Offset::new(53.0, -53.0));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn clamp(&self, raw: Offset) -> Offset {
        if !raw.is_finite() {
            return Offset::ZERO;
        }

        match *self {
            Self::Rectangle { limit_x, limit_y } => {
                // NaN or negative limits collapse to zero travel
                let (limit_x, limit_y) = (limit_x.max(0.0), limit_y.max(0.0));
                Offset {
                    x: raw.x.clamp(-limit_x, limit_x),
                    y: raw.y.clamp(-limit_y, limit_y),
                }
            }
            Self::Circle { limit } => clamp_radial(raw, limit.max(0.0)),
        }
    }
}

/// Scales `raw` back onto the circle of radius `limit` when it lies outside.
fn clamp_radial(raw: Offset, limit: f64) -> Offset {
    let distance = raw.magnitude();
    if distance == 0.0 || limit == 0.0 {
        return Offset::ZERO;
    }

    if distance <= limit {
        return raw;
    }

    let scale = limit / distance;
    Offset {
        x: raw.x * scale,
        y: raw.y * scale,
    }
}

fn checked_limit(name: &str, dimension: f64, border: f64, handle_size: f64) -> Result<f64> {
    if !dimension.is_finite() || dimension <= 0.0 {
        return Err(JoystickError::InvalidGeometry(format!(
            "zone {} must be greater than 0 (got {})",
            name, dimension
        )));
    }

    let limit = travel_limit(dimension, border, handle_size);
    if !limit.is_finite() || limit < 0.0 {
        return Err(JoystickError::InvalidGeometry(format!(
            "handle ({}) and border ({}) do not fit in zone {} {} (limit {})",
            handle_size, border, name, dimension, limit
        )));
    }

    Ok(limit)
}
