//! In-process stand-ins for the vendor drone SDK, used to run the manual
//! control loop without hardware.

mod sim_drone;
mod sim_pilot;


pub use sim_drone::{SimDrone, SimSessionParams};
pub use sim_pilot::SimPilot;
