//! Session lifecycle around manual control: takeoff and land requests, the
//! signals they resolve to and the reaction to drone session and mission events.

mod manual_flight_controller;
mod signal;


pub use manual_flight_controller::ManualFlightController;
pub use signal::{DroneSessionEvent, LandStatus, TakeoffStatus, ToggleOutcome};
