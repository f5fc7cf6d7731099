//! Manual flight control: shared joystick state, gesture translation and the
//! polling loop forwarding sampled commands to the flight-control sink.

mod axis_state;
mod control_command;
mod control_state;
mod gesture;
mod manual_loop;
mod session_slot;


pub use axis_state::{Axis, AxisState, Joystick};
pub use control_command::ControlCommand;
pub use control_state::{ControlState, ControlStateCell};
pub use gesture::{PanGesture, PanPhase, VirtualJoystick};
pub use manual_loop::{LoopExit, ManualControlLoop};
pub use session_slot::SessionSlot;
