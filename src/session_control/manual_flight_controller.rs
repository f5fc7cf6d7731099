use super::{DroneSessionEvent, LandStatus, TakeoffStatus, ToggleOutcome};
use crate::config::ControlConfig;
use crate::drone_session::DroneAdapter;
use crate::flight_control::{
    AxisState, ControlState, Joystick, LoopExit, ManualControlLoop, SessionSlot, VirtualJoystick,
};
use crate::{error, info, session, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;

struct ControllerInner {
    drone: Option<Arc<dyn DroneAdapter>>,
    slot: Option<Arc<SessionSlot>>,
    loop_handle: Option<JoinHandle<LoopExit>>,
    mission_engaged: bool,
}

/// Owner of the manual control session: handles takeoff and land requests,
/// spawns one [`ManualControlLoop`] per session and follows drone session and
/// mission lifecycle events.
///
/// Takeoff, land and event handling are serialized, so rapid repeated requests
/// resolve one after another: a second takeoff while a session is held is a
/// no-op and a land without a session does nothing.
pub struct ManualFlightController {
    config: ControlConfig,
    axes: Arc<AxisState>,
    inner: Mutex<ControllerInner>,
}

impl ManualFlightController {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            axes: Arc::new(AxisState::new()),
            inner: Mutex::new(ControllerInner {
                drone: None,
                slot: None,
                loop_handle: None,
                mission_engaged: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &ControlConfig { &self.config }

    pub fn axes(&self) -> Arc<AxisState> { Arc::clone(&self.axes) }

    /// Gesture handler for one of the two on-screen sticks.
    pub fn joystick(&self, stick: Joystick) -> VirtualJoystick {
        VirtualJoystick::new(stick, self.config.surface_dimension(), Arc::clone(&self.axes))
    }

    pub fn state(&self) -> ControlState {
        self.lock().slot.as_ref().map_or(ControlState::Idle, |slot| slot.state().get())
    }

    pub fn has_drone(&self) -> bool { self.lock().drone.is_some() }

    /// Acquires a control session from the connected drone and starts the loop.
    pub fn takeoff(&self) -> TakeoffStatus { self.takeoff_locked(&mut self.lock()) }

    fn takeoff_locked(&self, inner: &mut ControllerInner) -> TakeoffStatus {
        if inner.slot.is_some() {
            return TakeoffStatus::AlreadyEngaged;
        }
        let Some(drone) = inner.drone.clone() else {
            warn!("Takeoff requested without a connected drone.");
            return TakeoffStatus::NoDrone;
        };
        if inner.mission_engaged {
            warn!("Takeoff refused, a mission is engaged on {}.", drone.name());
            return TakeoffStatus::MissionEngaged;
        }
        let Some(session) = drone.create_control_session() else {
            warn!("{} refused to hand out a manual control session.", drone.name());
            return TakeoffStatus::SessionUnavailable;
        };

        let slot = Arc::new(SessionSlot::new(session));
        let ctrl_loop = ManualControlLoop::new(
            Arc::clone(&slot),
            Arc::clone(&drone),
            Arc::clone(&self.axes),
            &self.config,
        );
        match ctrl_loop.spawn() {
            Ok(handle) => {
                Self::reap_finished(inner);
                inner.loop_handle = Some(handle);
                inner.slot = Some(slot);
                info!("Manual control engaging on {}.", drone.name());
                TakeoffStatus::Engaged
            }
            Err(e) => {
                error!("Could not start manual control loop: {e}");
                if let Some(session) = slot.clear() {
                    session.deactivate();
                }
                TakeoffStatus::SpawnFailed
            }
        }
    }

    /// Releases the control session and commands the drone to land.
    pub fn land(&self) -> LandStatus { Self::land_locked(&mut self.lock()) }

    fn land_locked(inner: &mut ControllerInner) -> LandStatus {
        if !Self::release(inner) {
            return LandStatus::NotEngaged;
        }
        if let Some(drone) = inner.drone.as_ref() {
            info!("Landing {}.", drone.name());
            drone.land();
        }
        LandStatus::Landed
    }

    /// The combined takeoff/land control: lands while a session is held,
    /// takes off otherwise.
    pub fn on_takeoff_land(&self) -> ToggleOutcome {
        let mut inner = self.lock();
        if inner.slot.is_some() {
            ToggleOutcome::Land(Self::land_locked(&mut inner))
        } else {
            ToggleOutcome::Takeoff(self.takeoff_locked(&mut inner))
        }
    }

    /// Applies a single lifecycle event.
    pub fn handle_event(&self, event: DroneSessionEvent) {
        let mut inner = self.lock();
        match event {
            DroneSessionEvent::Opened(drone) => {
                if Self::release(&mut inner) {
                    warn!("New drone session opened while manual control was held, released it.");
                }
                session!("Drone session opened: {}.", drone.name());
                inner.drone = Some(drone);
                inner.mission_engaged = false;
            }
            DroneSessionEvent::Closed => {
                if Self::release(&mut inner) {
                    warn!("Drone session closed while manual control was held.");
                }
                if let Some(drone) = inner.drone.take() {
                    session!("Drone session closed: {}.", drone.name());
                }
                inner.mission_engaged = false;
            }
            DroneSessionEvent::MissionEngaged => {
                session!("Mission engaged.");
                inner.mission_engaged = true;
            }
            DroneSessionEvent::MissionDisengaged(reason) => {
                session!("Mission disengaged: {reason}");
                inner.mission_engaged = false;
            }
        }
    }

    /// Consumes lifecycle events until the channel closes or `c_tok` fires.
    pub async fn run(self: Arc<Self>, mut event_rx: Receiver<DroneSessionEvent>, c_tok: CancellationToken) {
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                event = event_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                }
            }
        }
        info!("Session event handler stopped.");
    }

    /// Blocks until the most recently started loop thread has returned and
    /// yields its exit reason. `None` if there is no loop to wait for.
    pub fn wait_loop_exit(&self) -> Option<LoopExit> {
        let handle = self.lock().loop_handle.take()?;
        match handle.join() {
            Ok(exit) => Some(exit),
            Err(_) => {
                error!("Manual control loop thread panicked.");
                None
            }
        }
    }

    /// Clears and deactivates the held session. Returns whether one was held.
    fn release(inner: &mut ControllerInner) -> bool {
        let Some(slot) = inner.slot.take() else {
            return false;
        };
        if let Some(session) = slot.clear() {
            session.deactivate();
        }
        true
    }

    fn reap_finished(inner: &mut ControllerInner) {
        if inner.loop_handle.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(Ok(exit)) = inner.loop_handle.take().map(JoinHandle::join) {
                info!("Previous manual control loop ended: {exit:?}");
            }
        }
    }
}
