//! # Configuration Module
//!
//! Handles loading and validating the joystick configuration from TOML.
//!
//! The configuration is supplied once at construction and never changes
//! afterwards. Every table except `[actuators]` may be omitted.
//!
//! ```toml
//! [zone]
//! shape = "circle"
//! width = 180
//! height = 180
//! handle_size = 70
//! border = 4
//!
//! [throttle]
//! min_interval_ms = 90
//!
//! [output]
//! mode = "absolute"
//! center_value = 90
//! max_range = 90
//!
//! [actuators]
//! pan_entity = "number.camera_pan"
//! tilt_entity = "number.camera_tilt"
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{JoystickError, Result};
use crate::geometry::TravelZone;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub zone: ZoneConfig,
    #[serde(default)]
    pub handle: HandleConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub actuators: ActuatorConfig,
}

/// Shape of the travel zone. Selects the clamp strategy.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoneShape {
    #[default]
    Rectangle,
    Circle,
}

/// Output domain of the dispatched axis values.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Values in `[-100, 100]`
    #[default]
    Percent,
    /// Values in `[center_value - max_range, center_value + max_range]`
    Absolute,
}

/// Travel zone geometry, in the host's linear units (CSS pixels)
#[derive(Debug, Deserialize, Clone)]
pub struct ZoneConfig {
    #[serde(default)]
    pub shape: ZoneShape,

    #[serde(default = "default_zone_width")]
    pub width: f64,

    #[serde(default = "default_zone_height")]
    pub height: f64,

    #[serde(default = "default_handle_size")]
    pub handle_size: f64,

    #[serde(default = "default_border")]
    pub border: f64,
}

/// Handle rendering configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HandleConfig {
    #[serde(default = "default_spring_back_ms")]
    pub spring_back_ms: u64,
}

/// Command rate limiting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ThrottleConfig {
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

/// Command output domain configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    #[serde(default = "default_center_value")]
    pub center_value: i32,

    #[serde(default = "default_max_range")]
    pub max_range: i32,
}

/// Remote actuator addressing
#[derive(Debug, Deserialize, Clone)]
pub struct ActuatorConfig {
    pub pan_entity: String,

    pub tilt_entity: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_service")]
    pub service: String,
}

// Default value functions
fn default_zone_width() -> f64 { 140.0 }
fn default_zone_height() -> f64 { 200.0 }
fn default_handle_size() -> f64 { 70.0 }
fn default_border() -> f64 { 4.0 }

fn default_spring_back_ms() -> u64 { 300 }

fn default_min_interval_ms() -> u64 { 80 }

fn default_center_value() -> i32 { 90 }
fn default_max_range() -> i32 { 90 }

fn default_domain() -> String { "number".to_string() }
fn default_service() -> String { "set_value".to_string() }

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            shape: ZoneShape::default(),
            width: default_zone_width(),
            height: default_zone_height(),
            handle_size: default_handle_size(),
            border: default_border(),
        }
    }
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self { spring_back_ms: default_spring_back_ms() }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { min_interval_ms: default_min_interval_ms() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            center_value: default_center_value(),
            max_range: default_max_range(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ptz_joystick::config::Config;
    ///
    /// let config = Config::load("config/joystick.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded joystick configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Examples
    ///
    /// ```
    /// use ptz_joystick::config::Config;
    ///
    /// let config = Config::from_toml_str(r#"
    /// [actuators]
    /// pan_entity = "number.pan"
    /// tilt_entity = "number.tilt"
    /// "#)?;
    /// assert_eq!(config.throttle.min_interval_ms, 80);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`JoystickError::InvalidGeometry`] when the zone cannot host the
    /// handle, and [`JoystickError::Config`] for any other out-of-range value.
    pub fn validate(&self) -> Result<()> {
        // Handle and border sizes
        if !self.zone.handle_size.is_finite() || self.zone.handle_size < 0.0 {
            return Err(JoystickError::Config(
                toml::de::Error::custom("handle_size must be a finite value >= 0")
            ));
        }

        if !self.zone.border.is_finite() || self.zone.border < 0.0 {
            return Err(JoystickError::Config(
                toml::de::Error::custom("border must be a finite value >= 0")
            ));
        }

        // Zone dimensions and derived travel limits
        TravelZone::from_config(&self.zone)?;

        if self.handle.spring_back_ms > 5000 {
            return Err(JoystickError::Config(
                toml::de::Error::custom("spring_back_ms must be between 0 and 5000")
            ));
        }

        if self.throttle.min_interval_ms == 0 || self.throttle.min_interval_ms > 10000 {
            return Err(JoystickError::Config(
                toml::de::Error::custom("min_interval_ms must be between 1 and 10000")
            ));
        }

        // Output domain only matters in absolute mode
        if self.output.mode == OutputMode::Absolute {
            if self.output.max_range <= 0 {
                return Err(JoystickError::Config(
                    toml::de::Error::custom("max_range must be greater than 0")
                ));
            }

            let fits = self.output.center_value.checked_add(self.output.max_range).is_some()
                && self.output.center_value.checked_sub(self.output.max_range).is_some();
            if !fits {
                return Err(JoystickError::Config(
                    toml::de::Error::custom("center_value +/- max_range overflows the output range")
                ));
            }
        }

        // Actuator addressing
        for (name, value) in [
            ("pan_entity", &self.actuators.pan_entity),
            ("tilt_entity", &self.actuators.tilt_entity),
            ("domain", &self.actuators.domain),
            ("service", &self.actuators.service),
        ] {
            if value.trim().is_empty() {
                return Err(JoystickError::Config(
                    toml::de::Error::custom(format!("{} cannot be empty", name))
                ));
            }
        }

        if self.actuators.pan_entity == self.actuators.tilt_entity {
            return Err(JoystickError::Config(
                toml::de::Error::custom("pan_entity and tilt_entity must differ")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config {
            zone: ZoneConfig::default(),
            handle: HandleConfig::default(),
            throttle: ThrottleConfig::default(),
            output: OutputConfig::default(),
            actuators: ActuatorConfig {
                pan_entity: "number.camera_pan".to_string(),
                tilt_entity: "number.camera_tilt".to_string(),
                domain: default_domain(),
                service: default_service(),
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = create_valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[zone]
shape = "circle"
width = 180
height = 180
handle_size = 70
border = 4

[throttle]
min_interval_ms = 90

[output]
mode = "absolute"
center_value = 90
max_range = 60

[actuators]
pan_entity = "number.camera_pan"
tilt_entity = "number.camera_tilt"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.zone.shape, ZoneShape::Circle);
        assert_eq!(config.zone.width, 180.0);
        assert_eq!(config.throttle.min_interval_ms, 90);
        assert_eq!(config.output.mode, OutputMode::Absolute);
        assert_eq!(config.output.max_range, 60);
        assert_eq!(config.actuators.domain, "number");
    }

    #[test]
    fn test_load_bundled_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/joystick.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.zone.shape, ZoneShape::Rectangle);
        assert_eq!(config.throttle.min_interval_ms, 80);
        assert_eq!(config.actuators.pan_entity, "number.camera_pan");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/joystick.toml");
        assert!(matches!(result, Err(JoystickError::Io(_))));
    }

    #[test]
    fn test_optional_tables_use_defaults() {
        let config = Config::from_toml_str(
            r#"
[actuators]
pan_entity = "number.pan"
tilt_entity = "number.tilt"
"#,
        )
        .unwrap();

        assert_eq!(config.zone.shape, ZoneShape::Rectangle);
        assert_eq!(config.zone.width, 140.0);
        assert_eq!(config.zone.height, 200.0);
        assert_eq!(config.handle.spring_back_ms, 300);
        assert_eq!(config.output.mode, OutputMode::Percent);
    }

    #[test]
    fn test_missing_actuators_table() {
        let result = Config::from_toml_str("[zone]\nshape = \"circle\"\n");
        assert!(matches!(result, Err(JoystickError::Config(_))));
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let result = Config::from_toml_str(
            r#"
[zone]
shape = "hexagon"

[actuators]
pan_entity = "number.pan"
tilt_entity = "number.tilt"
"#,
        );
        assert!(matches!(result, Err(JoystickError::Config(_))));
    }

    // ==================== Geometry Validation ====================

    #[test]
    fn test_zero_zone_width() {
        let mut config = create_valid_config();
        config.zone.width = 0.0;
        assert!(matches!(config.validate(), Err(JoystickError::InvalidGeometry(_))));
    }

    #[test]
    fn test_handle_larger_than_zone() {
        let mut config = create_valid_config();
        config.zone.handle_size = 150.0; // 140 wide zone
        assert!(matches!(config.validate(), Err(JoystickError::InvalidGeometry(_))));
    }

    #[test]
    fn test_border_consumes_zone() {
        let mut config = create_valid_config();
        config.zone.border = 40.0; // 140 - 80 - 70 < 0
        assert!(matches!(config.validate(), Err(JoystickError::InvalidGeometry(_))));
    }

    #[test]
    fn test_negative_handle_size() {
        let mut config = create_valid_config();
        config.zone.handle_size = -1.0;
        assert!(matches!(config.validate(), Err(JoystickError::Config(_))));
    }

    #[test]
    fn test_negative_border() {
        let mut config = create_valid_config();
        config.zone.border = -2.0;
        assert!(matches!(config.validate(), Err(JoystickError::Config(_))));
    }

    #[test]
    fn test_nan_border() {
        let mut config = create_valid_config();
        config.zone.border = f64::NAN;
        assert!(config.validate().is_err());
    }

    // ==================== Timing Validation ====================

    #[test]
    fn test_min_interval_zero() {
        let mut config = create_valid_config();
        config.throttle.min_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_interval_too_high() {
        let mut config = create_valid_config();
        config.throttle.min_interval_ms = 10001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_interval_tuned_range() {
        for interval in [60, 80, 90, 100] {
            let mut config = create_valid_config();
            config.throttle.min_interval_ms = interval;
            assert!(config.validate().is_ok(), "Interval {} should be valid", interval);
        }
    }

    #[test]
    fn test_spring_back_too_long() {
        let mut config = create_valid_config();
        config.handle.spring_back_ms = 5001;
        assert!(config.validate().is_err());
    }

    // ==================== Output Validation ====================

    #[test]
    fn test_absolute_zero_range() {
        let mut config = create_valid_config();
        config.output.mode = OutputMode::Absolute;
        config.output.max_range = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_percent_ignores_range() {
        let mut config = create_valid_config();
        config.output.mode = OutputMode::Percent;
        config.output.max_range = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absolute_range_overflow() {
        let mut config = create_valid_config();
        config.output.mode = OutputMode::Absolute;
        config.output.center_value = i32::MAX;
        config.output.max_range = 1;
        assert!(config.validate().is_err());
    }

    // ==================== Actuator Validation ====================

    #[test]
    fn test_empty_pan_entity() {
        let mut config = create_valid_config();
        config.actuators.pan_entity = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_service() {
        let mut config = create_valid_config();
        config.actuators.service = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_pan_and_tilt_entity() {
        let mut config = create_valid_config();
        config.actuators.tilt_entity = config.actuators.pan_entity.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_zone_width(), 140.0);
        assert_eq!(default_zone_height(), 200.0);
        assert_eq!(default_handle_size(), 70.0);
        assert_eq!(default_border(), 4.0);
        assert_eq!(default_spring_back_ms(), 300);
        assert_eq!(default_min_interval_ms(), 80);
        assert_eq!(default_center_value(), 90);
        assert_eq!(default_max_range(), 90);
        assert_eq!(default_domain(), "number");
        assert_eq!(default_service(), "set_value");
    }
}
