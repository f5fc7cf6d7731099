#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod drone_session;
mod flight_control;
mod keychain;
mod logger;
mod session_control;
mod sim;

use crate::config::{ControlConfig, SimConfig};
use crate::drone_session::DroneAdapter;
use crate::flight_control::{ControlState, Joystick, LoopExit};
use crate::keychain::Keychain;
use crate::session_control::{DroneSessionEvent, ToggleOutcome};
use crate::sim::{SimDrone, SimPilot, SimSessionParams};
use itertools::Itertools;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::time::{Instant, interval};

const STATUS_INTERVAL: Duration = Duration::from_secs(1);
const EVENT_SETTLE: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config = ControlConfig::from_env()
        .unwrap_or_else(|e| fatal!("Invalid manual control configuration: {e}"));
    let sim_config =
        SimConfig::from_env().unwrap_or_else(|e| fatal!("Invalid simulation configuration: {e}"));
    info!(
        "Manual control tick {}ms, surface {}, scale {}.",
        config.tick_interval().as_millis(),
        config.surface_dimension(),
        config.command_scale()
    );

    let drone = SimDrone::new("sim-drone", SimSessionParams {
        activation_failures: sim_config.activation_failures(),
        disengage_after: sim_config.disengage_after(),
    });
    let (k, event_rx) = Keychain::new(config, drone);
    let ctrl = k.ctrl();

    let event_task = tokio::spawn(k.ctrl().run(event_rx, k.c_tok()));
    let adapter: Arc<dyn DroneAdapter> = k.drone();
    if k.events().send(DroneSessionEvent::Opened(adapter)).await.is_err() {
        fatal!("Session event handler is gone before startup finished");
    }
    let pilot = SimPilot::new(
        ctrl.joystick(Joystick::Left),
        ctrl.joystick(Joystick::Right),
        config.surface_dimension(),
    );
    let pilot_task = tokio::spawn(pilot.run(k.c_tok()));
    tokio::time::sleep(EVENT_SETTLE).await;

    match ctrl.on_takeoff_land() {
        ToggleOutcome::Takeoff(status) => info!("Takeoff request: {status}"),
        ToggleOutcome::Land(status) => warn!("Expected a takeoff, landed instead: {status}"),
    }

    let deadline = Instant::now() + sim_config.run_time();
    let mut status_interval = interval(STATUS_INTERVAL);
    while Instant::now() < deadline {
        status_interval.tick().await;
        let state = ctrl.state();
        let axes = ctrl.axes();
        let sticks = Joystick::iter()
            .map(|stick| format!("{stick}: {}", if axes.is_active(stick) { "held" } else { "free" }))
            .join(", ");
        log!("State {state}, sticks [{sticks}], sink {}", k.drone().sink().last_command());
        if matches!(state, ControlState::Disengaged | ControlState::Idle) {
            break;
        }
    }

    match ctrl.on_takeoff_land() {
        ToggleOutcome::Land(status) => info!("Land request: {status}"),
        ToggleOutcome::Takeoff(status) => warn!("Expected a land, took off instead: {status}"),
    }
    if k.events().send(DroneSessionEvent::Closed).await.is_err() {
        warn!("Session event handler stopped before the drone session was closed.");
    }
    tokio::time::sleep(EVENT_SETTLE).await;
    k.c_tok().cancel();
    let _ = pilot_task.await;
    let _ = event_task.await;

    let exit_ctrl = Arc::clone(&ctrl);
    match tokio::task::spawn_blocking(move || exit_ctrl.wait_loop_exit()).await {
        Ok(Some(LoopExit::SessionCleared)) => info!("Control loop ended after land request."),
        Ok(Some(LoopExit::Disengaged(reason))) => warn!("Control loop ended on disengage: {reason}"),
        Ok(None) => warn!("No control loop was running."),
        Err(e) => error!("Waiting for the control loop failed: {e}"),
    }
    info!(
        "Sink received {} setter calls, drone landed {} time(s).",
        k.drone().sink().updates(),
        k.drone().landings()
    );
}
