use crate::config::ControlConfig;
use crate::session_control::{DroneSessionEvent, ManualFlightController};
use crate::sim::SimDrone;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio_util::sync::CancellationToken;

/// Struct bundling the long-lived components of the application so they can be
/// handed to spawned tasks as one unit.
#[derive(Clone)]
pub struct Keychain {
    /// The controller owning the manual control session.
    ctrl: Arc<ManualFlightController>,
    /// The simulated drone standing in for the vendor SDK.
    drone: Arc<SimDrone>,
    /// Sender side of the drone session event channel.
    events: Sender<DroneSessionEvent>,
    /// Token stopping all spawned tasks.
    c_tok: CancellationToken,
}

impl Keychain {
    const EVENT_BUFFER: usize = 16;

    /// Creates a new `Keychain`.
    ///
    /// # Arguments
    /// - `config`: Configuration of the manual control loop.
    /// - `drone`: The drone events will refer to.
    ///
    /// # Returns
    /// The keychain and the receiving end of the session event channel, to be
    /// handed to [`ManualFlightController::run`].
    pub fn new(config: ControlConfig, drone: SimDrone) -> (Self, Receiver<DroneSessionEvent>) {
        let (events, event_rx) = mpsc::channel(Self::EVENT_BUFFER);
        let keychain = Self {
            ctrl: Arc::new(ManualFlightController::new(config)),
            drone: Arc::new(drone),
            events,
            c_tok: CancellationToken::new(),
        };
        (keychain, event_rx)
    }

    /// Provides a cloned reference to the manual flight controller.
    pub fn ctrl(&self) -> Arc<ManualFlightController> { Arc::clone(&self.ctrl) }

    /// Provides a cloned reference to the simulated drone.
    pub fn drone(&self) -> Arc<SimDrone> { Arc::clone(&self.drone) }

    /// Provides a clone of the session event sender.
    pub fn events(&self) -> Sender<DroneSessionEvent> { self.events.clone() }

    /// Provides a clone of the shutdown token.
    pub fn c_tok(&self) -> CancellationToken { self.c_tok.clone() }
}
