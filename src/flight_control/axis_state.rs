use super::ControlCommand;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use strum_macros::{Display, EnumIter};

/// The two on-screen virtual joysticks.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, Hash, EnumIter)]
pub enum Joystick {
    /// Gates vertical speed and yaw rotation.
    Left,
    /// Gates pitch and roll.
    Right,
}

impl Joystick {
    /// Axes driven by (horizontal, vertical) pan translation on this stick.
    pub fn axes(self) -> (Axis, Axis) {
        match self {
            Joystick::Left => (Axis::Yaw, Axis::Vertical),
            Joystick::Right => (Axis::Roll, Axis::Pitch),
        }
    }
}

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy, Hash, EnumIter)]
pub enum Axis {
    Vertical,
    Yaw,
    Pitch,
    Roll,
}

impl Axis {
    /// The joystick whose active flag gates this axis.
    pub fn joystick(self) -> Joystick {
        match self {
            Axis::Vertical | Axis::Yaw => Joystick::Left,
            Axis::Pitch | Axis::Roll => Joystick::Right,
        }
    }
}

/// Normalized stick deflection shared between the gesture callbacks (single
/// writer) and the control loop thread (single reader).
///
/// Values are kept as `f64` bit patterns in atomics, so a reader never observes
/// a torn value. The four axes are independent; a reader may see a mix of an old
/// and a new deflection across axes within one sample, which only delays that
/// axis by one tick.
#[derive(Debug)]
pub struct AxisState {
    vertical: AtomicU64,
    yaw: AtomicU64,
    pitch: AtomicU64,
    roll: AtomicU64,
    left_active: AtomicBool,
    right_active: AtomicBool,
}

impl AxisState {
    pub fn new() -> Self {
        let zero = 0.0_f64.to_bits();
        Self {
            vertical: AtomicU64::new(zero),
            yaw: AtomicU64::new(zero),
            pitch: AtomicU64::new(zero),
            roll: AtomicU64::new(zero),
            left_active: AtomicBool::new(false),
            right_active: AtomicBool::new(false),
        }
    }

    fn slot(&self, axis: Axis) -> &AtomicU64 {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Yaw => &self.yaw,
            Axis::Pitch => &self.pitch,
            Axis::Roll => &self.roll,
        }
    }

    fn flag(&self, stick: Joystick) -> &AtomicBool {
        match stick {
            Joystick::Left => &self.left_active,
            Joystick::Right => &self.right_active,
        }
    }

    /// Stores `value` clamped to `[-1, 1]`. NaN is stored as `0`.
    pub fn set(&self, axis: Axis, value: f64) {
        let clamped = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
        self.slot(axis).store(clamped.to_bits(), Ordering::Release);
    }

    pub fn get(&self, axis: Axis) -> f64 { f64::from_bits(self.slot(axis).load(Ordering::Acquire)) }

    pub fn set_active(&self, stick: Joystick, active: bool) {
        self.flag(stick).store(active, Ordering::Release);
    }

    pub fn is_active(&self, stick: Joystick) -> bool { self.flag(stick).load(Ordering::Acquire) }

    /// Zeroes both axes of `stick` and marks it inactive.
    pub fn recenter(&self, stick: Joystick) {
        self.set_active(stick, false);
        let (horizontal, vertical) = stick.axes();
        self.set(horizontal, 0.0);
        self.set(vertical, 0.0);
    }

    /// Integer command for `axis`: `round(value * scale)` while its joystick is
    /// active, `0` otherwise.
    pub fn command_value(&self, axis: Axis, scale: u8) -> i8 {
        if self.is_active(axis.joystick()) { scale_axis(self.get(axis), scale) } else { 0 }
    }

    /// Samples all four axes into one command set.
    pub fn sample(&self, scale: u8) -> ControlCommand {
        ControlCommand {
            yaw: self.command_value(Axis::Yaw, scale),
            vertical: self.command_value(Axis::Vertical, scale),
            pitch: self.command_value(Axis::Pitch, scale),
            roll: self.command_value(Axis::Roll, scale),
        }
    }
}

impl Default for AxisState {
    fn default() -> Self { Self::new() }
}

/// Rounds `value * scale` to the nearest integer, halfway cases away from zero.
#[allow(clippy::cast_possible_truncation)]
pub fn scale_axis(value: f64, scale: u8) -> i8 {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
    // |clamped * scale| <= 100 after validation, fits into i8
    (clamped * f64::from(scale)).round().clamp(f64::from(i8::MIN), f64::from(i8::MAX)) as i8
}
