use super::{AxisState, ControlCommand, SessionSlot};
use crate::config::ControlConfig;
use crate::drone_session::{DisengageReason, DroneAdapter};
use crate::{event, info, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use strum_macros::Display;

/// Why a tick did not forward any commands. Always transient.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum SkipReason {
    ActivationFailed,
    NoFlightControl,
}

/// Result of a single loop iteration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TickOutcome {
    Sent(ControlCommand),
    Skipped(SkipReason),
    Disengaged(DisengageReason),
    Cleared,
}

/// Why the loop thread returned.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LoopExit {
    /// The owner emptied the session slot.
    SessionCleared,
    /// The drone revoked control.
    Disengaged(DisengageReason),
}

/// Blocking poll-and-sleep loop sampling the virtual joysticks and streaming
/// the result to the drone's flight-control sink while a session is held.
pub struct ManualControlLoop {
    slot: Arc<SessionSlot>,
    drone: Arc<dyn DroneAdapter>,
    axes: Arc<AxisState>,
    interval: Duration,
    scale: u8,
}

impl ManualControlLoop {
    const THREAD_NAME: &'static str = "manual-ctrl";

    pub fn new(
        slot: Arc<SessionSlot>,
        drone: Arc<dyn DroneAdapter>,
        axes: Arc<AxisState>,
        config: &ControlConfig,
    ) -> Self {
        Self {
            slot,
            drone,
            axes,
            interval: config.tick_interval(),
            scale: config.command_scale(),
        }
    }

    /// Moves the loop onto its own OS thread.
    ///
    /// # Errors
    /// Propagates the OS error if the thread could not be created.
    pub fn spawn(self) -> std::io::Result<JoinHandle<LoopExit>> {
        thread::Builder::new().name(String::from(Self::THREAD_NAME)).spawn(move || self.run())
    }

    /// Runs until the slot is cleared or the session reports a disengage reason.
    /// Never fails: transient problems only suppress the commands of one tick.
    pub fn run(&self) -> LoopExit {
        let mut next_tick = Instant::now();
        loop {
            match self.tick() {
                TickOutcome::Cleared => {
                    info!("Manual control session released, stopping control loop.");
                    return LoopExit::SessionCleared;
                }
                TickOutcome::Disengaged(reason) => {
                    warn!("{}", reason.display());
                    self.slot.state().mark_disengaged();
                    return LoopExit::Disengaged(reason);
                }
                TickOutcome::Sent(cmd) => event!("Forwarded {cmd}"),
                TickOutcome::Skipped(skip) => event!("Skipped tick: {skip}"),
            }
            next_tick += self.interval;
            let now = Instant::now();
            if next_tick <= now {
                // overran the interval, restart pacing from here
                next_tick = now + self.interval;
            }
            thread::sleep(next_tick - now);
        }
    }

    /// One iteration without the trailing sleep.
    ///
    /// The slot stays locked for the whole iteration: a land or session close
    /// racing with it waits until the commands are out, and no activation or
    /// setter call can follow the release.
    pub fn tick(&self) -> TickOutcome {
        self.slot
            .with_session(|session| {
                if let Some(reason) = session.disengage_reason() {
                    return TickOutcome::Disengaged(reason);
                }
                if !session.activate() {
                    return TickOutcome::Skipped(SkipReason::ActivationFailed);
                }
                let Some(sink) = self.drone.flight_control() else {
                    return TickOutcome::Skipped(SkipReason::NoFlightControl);
                };
                let cmd = self.axes.sample(self.scale);
                cmd.apply(sink.as_ref());
                if self.slot.state().mark_active() {
                    info!("Manual control active on {}.", self.drone.name());
                }
                TickOutcome::Sent(cmd)
            })
            .unwrap_or(TickOutcome::Cleared)
    }
}
