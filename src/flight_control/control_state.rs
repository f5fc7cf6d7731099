use std::sync::atomic::{AtomicU8, Ordering};
use strum_macros::Display;

/// Lifecycle of one manual control session as seen by the controller.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ControlState {
    /// No control session held.
    Idle = 0,
    /// Session created and loop thread started, no command forwarded yet.
    Engaging = 1,
    /// At least one command set reached the flight-control sink.
    Active = 2,
    /// The drone revoked control. Terminal until the session is released.
    Disengaged = 3,
}

impl From<u8> for ControlState {
    fn from(value: u8) -> Self {
        match value {
            1 => ControlState::Engaging,
            2 => ControlState::Active,
            3 => ControlState::Disengaged,
            _ => ControlState::Idle,
        }
    }
}

/// Atomic cell holding a [`ControlState`], written by both the owning
/// controller and the loop thread.
#[derive(Debug)]
pub struct ControlStateCell(AtomicU8);

impl ControlStateCell {
    pub fn new(state: ControlState) -> Self { Self(AtomicU8::new(state as u8)) }

    pub fn get(&self) -> ControlState { ControlState::from(self.0.load(Ordering::Acquire)) }

    /// `Engaging -> Active`. No effect in any other state.
    pub fn mark_active(&self) -> bool { self.transition(&[ControlState::Engaging], ControlState::Active) }

    /// `Engaging | Active -> Disengaged`. A released session stays `Idle`.
    pub fn mark_disengaged(&self) -> bool {
        self.transition(&[ControlState::Engaging, ControlState::Active], ControlState::Disengaged)
    }

    /// Unconditional transition to `Idle`.
    pub fn mark_idle(&self) { self.0.store(ControlState::Idle as u8, Ordering::Release); }

    fn transition(&self, from: &[ControlState], to: ControlState) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                from.contains(&ControlState::from(cur)).then_some(to as u8)
            })
            .is_ok()
    }
}
