//! # PTZ Joystick Library
//!
//! Drag a handle inside a bounded zone to steer a pan/tilt head.
//!
//! This library provides the gesture-to-command pipeline behind an on-screen
//! joystick: pointer tracking, clamping to a rectangular or circular travel
//! zone, normalization to the actuator's output domain, rate-limited
//! dispatch and spring-back to neutral on release.

pub mod actuator;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod joystick;
pub mod throttle;
