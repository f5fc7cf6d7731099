use crate::flight_control::{PanGesture, PanPhase, VirtualJoystick};
use crate::event;
use rand::Rng;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Drives both virtual joysticks with a random walk, emulating a pilot
/// dragging, holding and releasing the sticks.
pub struct SimPilot {
    left: VirtualJoystick,
    right: VirtualJoystick,
    surface_dimension: f64,
}

struct StickTrace {
    held: bool,
    dx: f64,
    dy: f64,
}

impl StickTrace {
    fn new() -> Self { Self { held: false, dx: 0.0, dy: 0.0 } }

    fn step<R: Rng>(&mut self, rng: &mut R, reach: f64) -> Option<PanGesture> {
        if self.held {
            if rng.random_bool(SimPilot::RELEASE_PROB) {
                self.held = false;
                return Some(PanGesture::new(PanPhase::Ended, self.dx, self.dy));
            }
            self.dx = (self.dx + rng.random_range(-reach..=reach) * 0.1).clamp(-reach, reach);
            self.dy = (self.dy + rng.random_range(-reach..=reach) * 0.1).clamp(-reach, reach);
            Some(PanGesture::new(PanPhase::Changed, self.dx, self.dy))
        } else if rng.random_bool(SimPilot::GRAB_PROB) {
            self.held = true;
            self.dx = 0.0;
            self.dy = 0.0;
            Some(PanGesture::new(PanPhase::Began, 0.0, 0.0))
        } else {
            None
        }
    }
}

impl SimPilot {
    /// Interval between two gesture samples, faster than the control tick.
    const GESTURE_INTERVAL: Duration = Duration::from_millis(40);
    const GRAB_PROB: f64 = 0.2;
    const RELEASE_PROB: f64 = 0.05;

    pub fn new(left: VirtualJoystick, right: VirtualJoystick, surface_dimension: f64) -> Self {
        Self { left, right, surface_dimension }
    }

    /// Feeds gestures until `c_tok` fires, then releases both sticks.
    pub async fn run(self, c_tok: CancellationToken) {
        let mut gesture_interval = interval(Self::GESTURE_INTERVAL);
        let mut left_trace = StickTrace::new();
        let mut right_trace = StickTrace::new();
        // overshooting the surface half-width exercises the clamping
        let reach = self.surface_dimension * 0.6;
        loop {
            tokio::select! {
                () = c_tok.cancelled() => break,
                _ = gesture_interval.tick() => {
                    let mut rng = rand::rng();
                    if let Some(gesture) = left_trace.step(&mut rng, reach) {
                        event!("Left stick {:?} ({:.1}, {:.1})", gesture.phase, gesture.dx, gesture.dy);
                        self.left.handle(gesture);
                    }
                    if let Some(gesture) = right_trace.step(&mut rng, reach) {
                        event!("Right stick {:?} ({:.1}, {:.1})", gesture.phase, gesture.dx, gesture.dy);
                        self.right.handle(gesture);
                    }
                }
            }
        }
        self.left.handle(PanGesture::new(PanPhase::Ended, 0.0, 0.0));
        self.right.handle(PanGesture::new(PanPhase::Ended, 0.0, 0.0));
    }
}
