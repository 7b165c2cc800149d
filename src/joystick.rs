//! # Joystick Widget Module
//!
//! The drag-gesture joystick: pointer tracking, clamping, command mapping,
//! throttled dispatch and spring-back on release.
//!
//! ## State Machine
//!
//! ```text
//!            pointer-down                 pointer-up / cancel
//!   Idle ─────────────────▶ Dragging ─────────────────────────▶ Idle
//!                            │    ▲      (neutral command sent,
//!                 pointer-move    │       handle springs back)
//!                            └────┘
//!                 clamp, render, throttled dispatch
//! ```
//!
//! Only one drag is tracked at a time. A pointer-down while dragging is
//! ignored until release.
//!
//! ## Usage
//!
//! ```
//! use ptz_joystick::config::Config;
//! use ptz_joystick::gesture::{PointerEvent, ZoneRect};
//! use ptz_joystick::joystick::Joystick;
//! use std::time::Instant;
//!
//! let config = Config::from_toml_str(r#"
//! [zone]
//! width = 180
//! height = 180
//! border = 2
//!
//! [actuators]
//! pan_entity = "number.camera_pan"
//! tilt_entity = "number.camera_tilt"
//! "#)?;
//!
//! let mut joystick = Joystick::new(&config)?;
//! let bounds = ZoneRect::new(0.0, 0.0, 180.0, 180.0);
//!
//! joystick.on_pointer_down(&PointerEvent::mouse(90.0, 90.0));
//! joystick.on_pointer_move(&PointerEvent::mouse(170.0, 90.0), &bounds, Instant::now());
//! assert_eq!(joystick.handle().offset.x, 53.0);
//!
//! joystick.on_pointer_up();
//! assert_eq!(joystick.handle().offset.x, 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use crate::actuator::{ActuatorSession, Dispatcher};
use crate::command::{AxisCommand, CommandMapping};
use crate::config::Config;
use crate::error::Result;
use crate::geometry::{Offset, TravelZone};
use crate::gesture::{PointerClaim, PointerEvent, ZoneRect};
use crate::throttle::Throttle;

/// How the renderer should move the handle to its current offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleMotion {
    /// No transition; the handle follows the pointer with zero lag.
    Immediate,
    /// Animated return to center.
    SpringBack { duration: Duration },
}

/// Render signal for the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleView {
    pub offset: Offset,
    pub motion: HandleMotion,
}

/// Per-instance interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub is_dragging: bool,
    /// Clamped offset, relative to the zone center.
    pub offset: Offset,
}

/// Pointer-driven pan/tilt joystick.
#[derive(Debug)]
pub struct Joystick {
    zone: TravelZone,
    mapping: CommandMapping,
    throttle: Throttle,
    dispatcher: Dispatcher,
    spring_back: Duration,
    state: PointerState,
    motion: HandleMotion,
}

impl Joystick {
    /// Builds a joystick from a configuration.
    ///
    /// The joystick starts idle and without a session; attach one with
    /// [`Joystick::attach_session`] once the host is connected.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, in particular
    /// [`JoystickError::InvalidGeometry`](crate::error::JoystickError::InvalidGeometry)
    /// when the handle does not fit the zone.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let zone = TravelZone::from_config(&config.zone)?;
        let mapping = CommandMapping::from_config(&config.output);

        info!(
            "Joystick ready: {:?}, output {}..={}, throttle {}ms",
            zone,
            mapping.min(),
            mapping.max(),
            config.throttle.min_interval_ms
        );

        Ok(Self {
            zone,
            mapping,
            throttle: Throttle::new(Duration::from_millis(config.throttle.min_interval_ms)),
            dispatcher: Dispatcher::from_config(&config.actuators),
            spring_back: Duration::from_millis(config.handle.spring_back_ms),
            state: PointerState::default(),
            motion: HandleMotion::Immediate,
        })
    }

    /// Builds a joystick with a session already attached.
    pub fn with_session(config: &Config, session: Box<dyn ActuatorSession>) -> Result<Self> {
        let mut joystick = Self::new(config)?;
        joystick.attach_session(session);
        Ok(joystick)
    }

    /// Attaches (or replaces) the live session.
    pub fn attach_session(&mut self, session: Box<dyn ActuatorSession>) {
        debug!("Session attached");
        self.dispatcher.attach(session);
    }

    /// Detaches the live session. The control keeps tracking locally.
    pub fn detach_session(&mut self) -> Option<Box<dyn ActuatorSession>> {
        debug!("Session detached");
        self.dispatcher.detach()
    }

    #[must_use]
    pub fn zone(&self) -> &TravelZone {
        &self.zone
    }

    #[must_use]
    pub fn mapping(&self) -> &CommandMapping {
        &self.mapping
    }

    #[must_use]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Current handle position and transition for the renderer.
    #[must_use]
    pub fn handle(&self) -> HandleView {
        HandleView {
            offset: self.state.offset,
            motion: self.motion,
        }
    }

    /// Command pair for the current handle position.
    #[must_use]
    pub fn current_command(&self) -> AxisCommand {
        self.mapping.map(self.state.offset, &self.zone)
    }

    /// Starts a drag.
    ///
    /// Returns [`PointerClaim::Claimed`] when the host should suppress its
    /// default drag/scroll handling. Events without coordinates and
    /// presses during an active drag are ignored.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PointerClaim {
        if self.state.is_dragging {
            trace!("Pointer down ignored, drag already active");
            return PointerClaim::Ignored;
        }

        if event.position().is_none() {
            trace!("Pointer down ignored, no coordinates");
            return PointerClaim::Ignored;
        }

        self.state.is_dragging = true;
        self.motion = HandleMotion::Immediate;
        debug!("Drag started");

        PointerClaim::Claimed
    }

    /// Tracks the pointer during a drag.
    ///
    /// `bounds` is the zone's current bounding box. The clamped offset is
    /// stored for rendering and a command is dispatched if the throttle
    /// allows it.
    pub fn on_pointer_move(&mut self, event: &PointerEvent, bounds: &ZoneRect, now: Instant) {
        if !self.state.is_dragging {
            return;
        }

        let Some((client_x, client_y)) = event.position() else {
            trace!("Pointer move ignored, no coordinates");
            return;
        };

        let raw = bounds.offset_of(client_x, client_y);
        if !raw.is_finite() {
            trace!("Pointer move ignored, bounds not usable: {:?}", bounds);
            return;
        }

        let clamped = self.zone.clamp(raw);
        self.state.offset = clamped;

        self.maybe_dispatch(clamped, now);
    }

    /// Ends a drag: springs the handle back and sends the neutral command.
    ///
    /// The neutral command bypasses the throttle. Calling this while idle
    /// has no effect.
    pub fn on_pointer_up(&mut self) {
        if !self.state.is_dragging {
            return;
        }

        self.state.is_dragging = false;
        self.state.offset = Offset::ZERO;
        self.motion = HandleMotion::SpringBack {
            duration: self.spring_back,
        };

        let neutral = self.mapping.neutral();
        let sent = self.dispatcher.dispatch(neutral);
        debug!("Drag ended, neutral {:?} sent: {}", neutral, sent);
    }

    /// Handles a cancelled pointer (touch-cancel, lost capture) like a release.
    pub fn on_pointer_cancel(&mut self) {
        self.on_pointer_up();
    }

    /// Dispatches the command for `offset` unless throttled.
    ///
    /// Returns `true` if a command pair was handed to the session.
    pub fn maybe_dispatch(&mut self, offset: Offset, now: Instant) -> bool {
        if !self.throttle.is_ready(now) {
            trace!("Command throttled at offset {:?}", offset);
            return false;
        }

        let command = self.mapping.map(offset, &self.zone);
        let sent = self.dispatcher.dispatch(command);
        if sent {
            self.throttle.mark(now);
            debug!("Dispatched {:?}", command);
        }

        sent
    }
}
