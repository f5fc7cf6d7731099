//! This module describes the externally owned collaborators the manual control
//! components talk to: the connected drone, the control session granting manual
//! authority over it and the flight-control sink accepting per-axis commands.
//! Vendor SDK bindings implement these traits; the `sim` module provides an
//! in-process implementation.

mod disengage_reason;
#[cfg(test)]
pub(crate) mod mock;

pub use disengage_reason::DisengageReason;

use std::sync::Arc;

/// Capability object granting exclusive manual-flight-control authority over a drone.
pub trait ControlSession: Send + Sync {
    /// Attempts to (re)activate manual control. Activation semantics are owned by
    /// the vendor SDK, repeated calls on an already active session are allowed.
    fn activate(&self) -> bool;
    /// Gives manual control authority back to the drone.
    fn deactivate(&self);
    /// Reason why manual control was revoked externally, if it was.
    fn disengage_reason(&self) -> Option<DisengageReason>;
}

/// Per-axis command interface of the aircraft. All values are signed
/// percentages in `[-100, 100]`.
pub trait FlightControlSink: Send + Sync {
    fn set_yaw_rotation_speed(&self, value: i8);
    fn set_vertical_speed(&self, value: i8);
    fn set_pitch(&self, value: i8);
    fn set_roll(&self, value: i8);
}

/// Handle of a connected drone as exposed by an open drone session.
pub trait DroneAdapter: Send + Sync {
    /// Human readable identifier used in log lines.
    fn name(&self) -> String;
    /// Requests a new manual control session. `None` if the drone refuses one.
    fn create_control_session(&self) -> Option<Arc<dyn ControlSession>>;
    /// The flight-control sink, unavailable e.g. while the link is torn down.
    fn flight_control(&self) -> Option<Arc<dyn FlightControlSink>>;
    /// Issues a land command.
    fn land(&self);
}
