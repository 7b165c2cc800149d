//! # Command Mapper Module
//!
//! Maps clamped handle offsets to pan/tilt axis values.
//!
//! ## Formula
//!
//! ```text
//! axis_value = floor(center_value + (offset / limit) * max_range + 0.5)
//! ```
//!
//! Halves round up, toward positive infinity, on both sides of center.
//!
//! The pan axis follows the horizontal offset. The tilt axis follows the
//! vertically inverted offset: dragging up (negative screen `y`) produces
//! positive tilt.
//!
//! ## Output Domains
//!
//! | Mode | Center | Range | Domain |
//! |------|--------|-------|--------|
//! | Percent | 0 | 100 | `[-100, 100]` |
//! | Absolute | `center_value` | `max_range` | `[center - range, center + range]` |
//!
//! ## Usage
//!
//! ```
//! use ptz_joystick::command::{AxisCommand, CommandMapping};
//! use ptz_joystick::geometry::{Offset, TravelZone};
//!
//! let zone = TravelZone::circle(180.0, 70.0, 2.0)?;
//! let mapping = CommandMapping::percent();
//!
//! let command = mapping.map(Offset::new(26.5, -26.5), &zone);
//! assert_eq!(command, AxisCommand { pan: 50, tilt: 50 });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::{OutputConfig, OutputMode};
use crate::geometry::{Offset, TravelZone};

/// Percent mode center value.
pub const PERCENT_CENTER: i32 = 0;
/// Percent mode range.
pub const PERCENT_RANGE: i32 = 100;

/// One pan/tilt command pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCommand {
    pub pan: i32,
    pub tilt: i32,
}

/// Linear mapping from travel offset to the output domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMapping {
    center: i32,
    range: i32,
}

impl Default for CommandMapping {
    fn default() -> Self {
        Self::percent()
    }
}

impl CommandMapping {
    /// Percentage output in `[-100, 100]`.
    #[must_use]
    pub fn percent() -> Self {
        Self {
            center: PERCENT_CENTER,
            range: PERCENT_RANGE,
        }
    }

    /// Absolute output in `[center - range, center + range]`.
    ///
    /// A negative range is treated as its magnitude.
    #[must_use]
    pub fn absolute(center: i32, range: i32) -> Self {
        Self {
            center,
            range: range.saturating_abs(),
        }
    }

    /// Builds the mapping selected by the `[output]` table.
    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        match output.mode {
            OutputMode::Percent => Self::percent(),
            OutputMode::Absolute => Self::absolute(output.center_value, output.max_range),
        }
    }

    #[must_use]
    pub fn center(&self) -> i32 {
        self.center
    }

    #[must_use]
    pub fn range(&self) -> i32 {
        self.range
    }

    /// Lowest value this mapping can emit.
    #[must_use]
    pub fn min(&self) -> i32 {
        self.center.saturating_sub(self.range)
    }

    /// Highest value this mapping can emit.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.center.saturating_add(self.range)
    }

    /// The command pair sent on release.
    #[must_use]
    pub fn neutral(&self) -> AxisCommand {
        AxisCommand {
            pan: self.center,
            tilt: self.center,
        }
    }

    /// Maps a single axis offset to an output value.
    ///
    /// The result is always within [`min`](Self::min)..=[`max`](Self::max).
    /// A zero limit maps every offset to the center value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ptz_joystick::command::CommandMapping;
    ///
    /// let mapping = CommandMapping::absolute(90, 90);
    /// assert_eq!(mapping.axis_value(53.0, 53.0), 180);
    /// assert_eq!(mapping.axis_value(-53.0, 53.0), 0);
    /// assert_eq!(mapping.axis_value(0.0, 53.0), 90);
    /// ```
    #[must_use]
    pub fn axis_value(&self, offset: f64, limit: f64) -> i32 {
        if limit.is_nan() || limit <= 0.0 || !offset.is_finite() {
            return self.center;
        }

        let ratio = (offset / limit).clamp(-1.0, 1.0);
        let value = f64::from(self.center) + ratio * f64::from(self.range);
        let rounded = (value + 0.5)
            .floor()
            .clamp(f64::from(self.min()), f64::from(self.max()));

        rounded as i32
    }

    /// Maps a clamped offset to a pan/tilt command pair.
    #[must_use]
    pub fn map(&self, offset: Offset, zone: &TravelZone) -> AxisCommand {
        AxisCommand {
            pan: self.axis_value(offset.x, zone.limit_x()),
            tilt: self.axis_value(-offset.y, zone.limit_y()),
        }
    }
}
