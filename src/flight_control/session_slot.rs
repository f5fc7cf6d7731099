use super::{ControlState, ControlStateCell};
use crate::drone_session::ControlSession;
use std::sync::{Arc, Mutex, PoisonError};

/// Nullable holder of the control session a single loop instance works on.
///
/// The owner clears the slot to stop the loop; the loop observes the empty slot
/// at the top of its next iteration. Every takeoff gets a fresh slot, so a loop
/// that is still winding down can never pick up a later session.
pub struct SessionSlot {
    session: Mutex<Option<Arc<dyn ControlSession>>>,
    state: ControlStateCell,
}

impl SessionSlot {
    pub fn new(session: Arc<dyn ControlSession>) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            state: ControlStateCell::new(ControlState::Engaging),
        }
    }

    /// Runs `f` on the held session while keeping the slot locked, so a
    /// concurrent [`SessionSlot::clear`] waits until `f` has returned.
    /// Returns `None` without calling `f` once the slot is cleared.
    pub fn with_session<R>(&self, f: impl FnOnce(&Arc<dyn ControlSession>) -> R) -> Option<R> {
        let guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(f)
    }

    /// Empties the slot and returns what it held. Only the first call yields the
    /// session, later calls return `None`. Blocks while a
    /// [`SessionSlot::with_session`] call is in progress.
    pub fn clear(&self) -> Option<Arc<dyn ControlSession>> {
        let taken = self.session.lock().unwrap_or_else(PoisonError::into_inner).take();
        self.state.mark_idle();
        taken
    }

    pub fn state(&self) -> &ControlStateCell { &self.state }
}
