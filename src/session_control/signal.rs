use crate::drone_session::{DisengageReason, DroneAdapter};
use std::sync::Arc;
use strum_macros::Display;

/// Notifications from the drone session manager and the mission executor.
pub enum DroneSessionEvent {
    Opened(Arc<dyn DroneAdapter>),
    Closed,
    MissionEngaged,
    MissionDisengaged(DisengageReason),
}

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum TakeoffStatus {
    Engaged,
    AlreadyEngaged,
    NoDrone,
    MissionEngaged,
    SessionUnavailable,
    SpawnFailed,
}

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum LandStatus {
    Landed,
    NotEngaged,
}

/// Result of the combined takeoff/land control.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum ToggleOutcome {
    Takeoff(TakeoffStatus),
    Land(LandStatus),
}
