use crate::drone_session::FlightControlSink;
use std::fmt;

/// One tick worth of integer commands, each a signed percentage in `[-100, 100]`.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ControlCommand {
    pub yaw: i8,
    pub vertical: i8,
    pub pitch: i8,
    pub roll: i8,
}

impl ControlCommand {
    /// Forwards all four values to `sink`. The setters are independent, no
    /// ordering between axes is implied.
    pub fn apply(&self, sink: &dyn FlightControlSink) {
        sink.set_yaw_rotation_speed(self.yaw);
        sink.set_vertical_speed(self.vertical);
        sink.set_pitch(self.pitch);
        sink.set_roll(self.roll);
    }

    pub fn is_neutral(&self) -> bool { *self == Self::default() }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[yaw {:>4}, vert {:>4}, pitch {:>4}, roll {:>4}]",
            self.yaw, self.vertical, self.pitch, self.roll
        )
    }
}
