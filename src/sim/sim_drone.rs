use crate::drone_session::{ControlSession, DisengageReason, DroneAdapter, FlightControlSink};
use crate::flight_control::ControlCommand;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, AtomicI8, AtomicU32, AtomicU64, Ordering},
};
use std::time::{Duration, Instant};

/// Flight-control sink keeping the last value per axis and a setter counter.
#[derive(Debug, Default)]
pub struct SimFlightControl {
    yaw: AtomicI8,
    vertical: AtomicI8,
    pitch: AtomicI8,
    roll: AtomicI8,
    updates: AtomicU64,
}

impl SimFlightControl {
    pub fn last_command(&self) -> ControlCommand {
        ControlCommand {
            yaw: self.yaw.load(Ordering::Relaxed),
            vertical: self.vertical.load(Ordering::Relaxed),
            pitch: self.pitch.load(Ordering::Relaxed),
            roll: self.roll.load(Ordering::Relaxed),
        }
    }

    /// Number of setter calls received so far.
    pub fn updates(&self) -> u64 { self.updates.load(Ordering::Relaxed) }

    fn store(&self, axis: &AtomicI8, value: i8) {
        axis.store(value, Ordering::Relaxed);
        self.updates.fetch_add(1, Ordering::Relaxed);
    }
}

impl FlightControlSink for SimFlightControl {
    fn set_yaw_rotation_speed(&self, value: i8) { self.store(&self.yaw, value); }
    fn set_vertical_speed(&self, value: i8) { self.store(&self.vertical, value); }
    fn set_pitch(&self, value: i8) { self.store(&self.pitch, value); }
    fn set_roll(&self, value: i8) { self.store(&self.roll, value); }
}

/// Control session refusing the first `failures` activations and, if a
/// deadline is set, revoking control once it passes.
#[derive(Debug)]
pub struct SimControlSession {
    failures_left: AtomicU32,
    disengage_at: Option<Instant>,
    active: AtomicBool,
}

impl SimControlSession {
    pub fn new(failures: u32, disengage_after: Option<Duration>) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            disengage_at: disengage_after.map(|dt| Instant::now() + dt),
            active: AtomicBool::new(false),
        }
    }

    pub fn is_active(&self) -> bool { self.active.load(Ordering::Acquire) }
}

impl ControlSession for SimControlSession {
    fn activate(&self) -> bool {
        let refused = self
            .failures_left
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1))
            .is_ok();
        if refused {
            return false;
        }
        self.active.store(true, Ordering::Release);
        true
    }

    fn deactivate(&self) { self.active.store(false, Ordering::Release); }

    fn disengage_reason(&self) -> Option<DisengageReason> {
        self.disengage_at.filter(|t| Instant::now() >= *t).map(|_| {
            DisengageReason::new("Failsafe triggered").with_details("simulated RC link loss")
        })
    }
}

/// Parameters for the sessions handed out by a [`SimDrone`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimSessionParams {
    pub activation_failures: u32,
    pub disengage_after: Option<Duration>,
}

/// In-process drone standing in for a vendor SDK adapter.
#[derive(Debug)]
pub struct SimDrone {
    name: String,
    params: SimSessionParams,
    sink: Arc<SimFlightControl>,
    linked: AtomicBool,
    landings: AtomicU32,
    last_session: Mutex<Option<Arc<SimControlSession>>>,
}

impl SimDrone {
    pub fn new(name: &str, params: SimSessionParams) -> Self {
        Self {
            name: String::from(name),
            params,
            sink: Arc::new(SimFlightControl::default()),
            linked: AtomicBool::new(true),
            landings: AtomicU32::new(0),
            last_session: Mutex::new(None),
        }
    }

    pub fn sink(&self) -> Arc<SimFlightControl> { Arc::clone(&self.sink) }

    /// Simulates the flight-control link going away and coming back.
    pub fn set_linked(&self, linked: bool) { self.linked.store(linked, Ordering::Release); }

    pub fn landings(&self) -> u32 { self.landings.load(Ordering::Acquire) }

    pub fn last_session(&self) -> Option<Arc<SimControlSession>> {
        self.last_session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl DroneAdapter for SimDrone {
    fn name(&self) -> String { self.name.clone() }

    fn create_control_session(&self) -> Option<Arc<dyn ControlSession>> {
        let session = Arc::new(SimControlSession::new(
            self.params.activation_failures,
            self.params.disengage_after,
        ));
        *self.last_session.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&session));
        Some(session)
    }

    fn flight_control(&self) -> Option<Arc<dyn FlightControlSink>> {
        if self.linked.load(Ordering::Acquire) {
            let sink: Arc<dyn FlightControlSink> = self.sink.clone();
            Some(sink)
        } else {
            None
        }
    }

    fn land(&self) {
        self.landings.fetch_add(1, Ordering::AcqRel);
        self.sink.set_vertical_speed(0);
    }
}
