//! # Actuator Module
//!
//! Delivery of pan/tilt commands to the host's live session.
//!
//! This module handles:
//! - The [`ActuatorSession`] seam the host implements (or mocks in tests)
//! - Encoding a command as a remote "set numeric value" call ([`ServiceCall`])
//! - Bridging the synchronous widget to an async host task ([`ChannelSession`])
//! - Best-effort dispatch of both axes ([`Dispatcher`])
//!
//! Delivery is fire-and-forget. A missing, closed or saturated session drops
//! the command; nothing is queued or retried.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace};

use crate::command::AxisCommand;
use crate::config::ActuatorConfig;
use crate::error::{JoystickError, Result};

/// Calls made per dispatched command: pan, then tilt.
pub const CALLS_PER_COMMAND: usize = 2;

/// Live session able to set a numeric value on a remote entity.
#[cfg_attr(test, mockall::automock)]
pub trait ActuatorSession {
    /// Whether the session can currently accept calls.
    fn is_ready(&self) -> bool;

    /// Sets `entity_id` to `value`. Must not block.
    fn set_value(&self, entity_id: &str, value: i32) -> Result<()>;
}

/// Payload of a "set numeric value" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    pub entity_id: String,
    pub value: i32,
}

/// Remote service invocation, e.g. `number.set_value`.
///
/// # Examples
///
/// ```
/// use ptz_joystick::actuator::ServiceCall;
///
/// let call = ServiceCall::new("number", "set_value", "number.camera_pan", 42);
/// assert_eq!(
///     call.to_json()?,
///     r#"{"domain":"number","service":"set_value","service_data":{"entity_id":"number.camera_pan","value":42}}"#
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub service_data: ServiceData,
}

impl ServiceCall {
    #[must_use]
    pub fn new(domain: &str, service: &str, entity_id: &str, value: i32) -> Self {
        Self {
            domain: domain.to_string(),
            service: service.to_string(),
            service_data: ServiceData {
                entity_id: entity_id.to_string(),
                value,
            },
        }
    }

    /// Encodes the call as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Session that forwards calls to an async task over a bounded channel.
///
/// The receiving half belongs to the host, which performs the actual
/// network call. Sending never blocks: a full channel drops the command.
///
/// # Examples
///
/// ```
/// use ptz_joystick::actuator::{ActuatorSession, ChannelSession};
///
/// let (session, mut rx) = ChannelSession::channel(8, "number", "set_value");
/// session.set_value("number.camera_pan", 10)?;
///
/// let call = rx.try_recv()?;
/// assert_eq!(call.service_data.value, 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSession {
    sender: mpsc::Sender<ServiceCall>,
    domain: String,
    service: String,
}

impl ChannelSession {
    /// Creates a session and the receiver the host drains.
    ///
    /// `capacity` counts command pairs, so a dispatch never fills the
    /// channel between its pan and tilt calls. It is raised to 1 if zero.
    #[must_use]
    pub fn channel(
        capacity: usize,
        domain: &str,
        service: &str,
    ) -> (Self, mpsc::Receiver<ServiceCall>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1).saturating_mul(CALLS_PER_COMMAND));
        let session = Self {
            sender,
            domain: domain.to_string(),
            service: service.to_string(),
        };
        (session, receiver)
    }

    /// Creates a session using the domain and service from configuration.
    #[must_use]
    pub fn from_config(
        capacity: usize,
        actuators: &ActuatorConfig,
    ) -> (Self, mpsc::Receiver<ServiceCall>) {
        Self::channel(capacity, &actuators.domain, &actuators.service)
    }
}

impl ActuatorSession for ChannelSession {
    fn is_ready(&self) -> bool {
        !self.sender.is_closed()
    }

    fn set_value(&self, entity_id: &str, value: i32) -> Result<()> {
        let call = ServiceCall::new(&self.domain, &self.service, entity_id, value);
        self.sender.try_send(call).map_err(|e| match e {
            TrySendError::Full(_) => {
                JoystickError::SessionUnavailable("command channel full".to_string())
            }
            TrySendError::Closed(_) => {
                JoystickError::SessionUnavailable("session closed".to_string())
            }
        })
    }
}

/// Sends command pairs to the pan and tilt entities.
///
/// The session is optional and may be attached or replaced at any time,
/// e.g. once the host finishes connecting.
pub struct Dispatcher {
    session: Option<Box<dyn ActuatorSession>>,
    pan_entity: String,
    tilt_entity: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pan_entity", &self.pan_entity)
            .field("tilt_entity", &self.tilt_entity)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(pan_entity: &str, tilt_entity: &str) -> Self {
        Self {
            session: None,
            pan_entity: pan_entity.to_string(),
            tilt_entity: tilt_entity.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(actuators: &ActuatorConfig) -> Self {
        Self::new(&actuators.pan_entity, &actuators.tilt_entity)
    }

    #[must_use]
    pub fn pan_entity(&self) -> &str {
        &self.pan_entity
    }

    #[must_use]
    pub fn tilt_entity(&self) -> &str {
        &self.tilt_entity
    }

    /// Attaches (or replaces) the live session.
    pub fn attach(&mut self, session: Box<dyn ActuatorSession>) {
        self.session = Some(session);
    }

    /// Detaches the live session, returning it.
    pub fn detach(&mut self) -> Option<Box<dyn ActuatorSession>> {
        self.session.take()
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Sends one command pair as two independent calls, pan first.
    ///
    /// Returns `false` if no ready session was available, in which case
    /// nothing was sent. Individual call failures are logged and dropped.
    pub fn dispatch(&self, command: AxisCommand) -> bool {
        let session = match &self.session {
            Some(session) if session.is_ready() => session,
            Some(_) => {
                debug!("Session not ready, dropping command {:?}", command);
                return false;
            }
            None => {
                trace!("No session attached, dropping command {:?}", command);
                return false;
            }
        };

        for (entity, value) in [
            (&self.pan_entity, command.pan),
            (&self.tilt_entity, command.tilt),
        ] {
            if let Err(e) = session.set_value(entity, value) {
                debug!("Failed to set {} to {}: {}", entity, value, e);
            }
        }

        true
    }
}
