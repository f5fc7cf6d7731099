use super::{ControlSession, DisengageReason, DroneAdapter, FlightControlSink};
use std::collections::VecDeque;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SinkCall {
    YawRotationSpeed(i8),
    VerticalSpeed(i8),
    Pitch(i8),
    Roll(i8),
}

/// Sink recording every setter call in order.
#[derive(Default)]
pub(crate) struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    pub(crate) fn calls(&self) -> Vec<SinkCall> { self.calls.lock().unwrap().clone() }
    pub(crate) fn call_count(&self) -> usize { self.calls.lock().unwrap().len() }
    fn push(&self, call: SinkCall) { self.calls.lock().unwrap().push(call); }
}

impl FlightControlSink for RecordingSink {
    fn set_yaw_rotation_speed(&self, value: i8) { self.push(SinkCall::YawRotationSpeed(value)); }
    fn set_vertical_speed(&self, value: i8) { self.push(SinkCall::VerticalSpeed(value)); }
    fn set_pitch(&self, value: i8) { self.push(SinkCall::Pitch(value)); }
    fn set_roll(&self, value: i8) { self.push(SinkCall::Roll(value)); }
}

/// Session whose activation results are scripted up front. Once the script is
/// exhausted `fallback` is returned.
pub(crate) struct MockSession {
    script: Mutex<VecDeque<bool>>,
    fallback: bool,
    reason: Mutex<Option<DisengageReason>>,
    activations: AtomicUsize,
    deactivations: AtomicUsize,
}

impl MockSession {
    pub(crate) fn always(result: bool) -> Self { Self::scripted(Vec::new(), result) }

    pub(crate) fn scripted(script: Vec<bool>, fallback: bool) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            reason: Mutex::new(None),
            activations: AtomicUsize::new(0),
            deactivations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn disengage(&self, reason: DisengageReason) {
        *self.reason.lock().unwrap() = Some(reason);
    }

    pub(crate) fn activations(&self) -> usize { self.activations.load(Ordering::SeqCst) }
    pub(crate) fn deactivations(&self) -> usize { self.deactivations.load(Ordering::SeqCst) }
}

impl ControlSession for MockSession {
    fn activate(&self) -> bool {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().unwrap_or(self.fallback)
    }

    fn deactivate(&self) { self.deactivations.fetch_add(1, Ordering::SeqCst); }

    fn disengage_reason(&self) -> Option<DisengageReason> { self.reason.lock().unwrap().clone() }
}

/// Drone handing out one prepared session and an optional recording sink.
pub(crate) struct MockDrone {
    session: Arc<MockSession>,
    sink: Arc<RecordingSink>,
    sink_available: AtomicBool,
    session_available: AtomicBool,
    lands: AtomicUsize,
    sessions_created: AtomicUsize,
}

impl MockDrone {
    pub(crate) fn new(session: Arc<MockSession>) -> Self {
        Self {
            session,
            sink: Arc::new(RecordingSink::default()),
            sink_available: AtomicBool::new(true),
            session_available: AtomicBool::new(true),
            lands: AtomicUsize::new(0),
            sessions_created: AtomicUsize::new(0),
        }
    }

    pub(crate) fn sink(&self) -> Arc<RecordingSink> { Arc::clone(&self.sink) }
    pub(crate) fn session(&self) -> Arc<MockSession> { Arc::clone(&self.session) }
    pub(crate) fn set_sink_available(&self, available: bool) {
        self.sink_available.store(available, Ordering::SeqCst);
    }
    pub(crate) fn set_session_available(&self, available: bool) {
        self.session_available.store(available, Ordering::SeqCst);
    }
    pub(crate) fn lands(&self) -> usize { self.lands.load(Ordering::SeqCst) }
    pub(crate) fn sessions_created(&self) -> usize { self.sessions_created.load(Ordering::SeqCst) }
}

impl DroneAdapter for MockDrone {
    fn name(&self) -> String { String::from("mock") }

    fn create_control_session(&self) -> Option<Arc<dyn ControlSession>> {
        if !self.session_available.load(Ordering::SeqCst) {
            return None;
        }
        self.sessions_created.fetch_add(1, Ordering::SeqCst);
        let session: Arc<dyn ControlSession> = self.session.clone();
        Some(session)
    }

    fn flight_control(&self) -> Option<Arc<dyn FlightControlSink>> {
        if self.sink_available.load(Ordering::SeqCst) {
            let sink: Arc<dyn FlightControlSink> = self.sink.clone();
            Some(sink)
        } else {
            None
        }
    }

    fn land(&self) { self.lands.fetch_add(1, Ordering::SeqCst); }
}

/// Ordered record of every call crossing the drone boundary, shared between a
/// [`JournalingDrone`], its session and its sink.
#[derive(Default, Clone)]
pub(crate) struct CallJournal {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl CallJournal {
    pub(crate) fn entries(&self) -> Vec<&'static str> { self.entries.lock().unwrap().clone() }
    fn push(&self, entry: &'static str) { self.entries.lock().unwrap().push(entry); }
}

/// Session that always grants control but takes `activation_time` to do so.
pub(crate) struct SlowSession {
    journal: CallJournal,
    activation_time: Duration,
}

impl ControlSession for SlowSession {
    fn activate(&self) -> bool {
        thread::sleep(self.activation_time);
        self.journal.push("activate");
        true
    }

    fn deactivate(&self) { self.journal.push("deactivate"); }

    fn disengage_reason(&self) -> Option<DisengageReason> { None }
}

struct JournalingSink {
    journal: CallJournal,
}

impl FlightControlSink for JournalingSink {
    fn set_yaw_rotation_speed(&self, _: i8) { self.journal.push("set"); }
    fn set_vertical_speed(&self, _: i8) { self.journal.push("set"); }
    fn set_pitch(&self, _: i8) { self.journal.push("set"); }
    fn set_roll(&self, _: i8) { self.journal.push("set"); }
}

/// Drone with a [`SlowSession`], journaling activations, releases, setter
/// calls and land commands in the order they happen.
pub(crate) struct JournalingDrone {
    journal: CallJournal,
    session: Arc<SlowSession>,
    sink: Arc<JournalingSink>,
}

impl JournalingDrone {
    pub(crate) fn new(activation_time: Duration) -> Self {
        let journal = CallJournal::default();
        Self {
            session: Arc::new(SlowSession { journal: journal.clone(), activation_time }),
            sink: Arc::new(JournalingSink { journal: journal.clone() }),
            journal,
        }
    }

    pub(crate) fn journal(&self) -> CallJournal { self.journal.clone() }
}

impl DroneAdapter for JournalingDrone {
    fn name(&self) -> String { String::from("journaling") }

    fn create_control_session(&self) -> Option<Arc<dyn ControlSession>> {
        let session: Arc<dyn ControlSession> = self.session.clone();
        Some(session)
    }

    fn flight_control(&self) -> Option<Arc<dyn FlightControlSink>> {
        let sink: Arc<dyn FlightControlSink> = self.sink.clone();
        Some(sink)
    }

    fn land(&self) { self.journal.push("land"); }
}
