use super::{AxisState, Joystick};
use std::sync::Arc;

/// Lifecycle phase of a pan gesture as reported by the UI toolkit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// A pan gesture sample: translation since the gesture began, in surface units,
/// with y growing downwards.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PanGesture {
    pub phase: PanPhase,
    pub dx: f64,
    pub dy: f64,
}

impl PanGesture {
    pub fn new(phase: PanPhase, dx: f64, dy: f64) -> Self { Self { phase, dx, dy } }
}

/// Maps a translation delta onto `[-1, 1]`: `clamp(-1, 1, (delta / dim) * 2)`.
///
/// A non-positive or non-finite `surface_dimension` and a NaN `delta` both yield `0`.
pub fn translate_delta(delta: f64, surface_dimension: f64) -> f64 {
    if !surface_dimension.is_finite() || surface_dimension <= 0.0 || delta.is_nan() {
        return 0.0;
    }
    ((delta / surface_dimension) * 2.0).clamp(-1.0, 1.0)
}

/// Gesture handler of one on-screen stick, writing into the shared [`AxisState`].
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    stick: Joystick,
    surface_dimension: f64,
    axes: Arc<AxisState>,
}

impl VirtualJoystick {
    pub fn new(stick: Joystick, surface_dimension: f64, axes: Arc<AxisState>) -> Self {
        Self { stick, surface_dimension, axes }
    }

    /// Applies a gesture sample. Dragging up (negative `dy`) climbs on the left
    /// stick and pitches forward on the right one.
    pub fn handle(&self, gesture: PanGesture) {
        match gesture.phase {
            PanPhase::Began | PanPhase::Changed => {
                let (horizontal, vertical) = self.stick.axes();
                self.axes.set(horizontal, translate_delta(gesture.dx, self.surface_dimension));
                self.axes.set(vertical, -translate_delta(gesture.dy, self.surface_dimension));
                self.axes.set_active(self.stick, true);
            }
            PanPhase::Ended | PanPhase::Cancelled => self.axes.recenter(self.stick),
        }
    }
}
