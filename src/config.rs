use std::{env, fmt, time::Duration};

/// Tunables of the manual control loop and the gesture translation feeding it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    /// Pause between two loop iterations.
    tick_interval: Duration,
    /// Edge length of the square input surface a single virtual joystick spans.
    surface_dimension: f64,
    /// Factor applied to a normalized axis value before rounding to a command.
    command_scale: u8,
}

impl ControlConfig {
    /// Default pause between two loop iterations.
    pub const DEF_TICK_INTERVAL: Duration = Duration::from_millis(100);
    /// Default edge length of a virtual joystick surface.
    pub const DEF_SURFACE_DIMENSION: f64 = 200.0;
    /// Default command scale, mapping `[-1, 1]` onto `[-100, 100]`.
    pub const DEF_COMMAND_SCALE: u8 = 100;
    /// Upper bound for the command scale, the flight-control sink accepts `[-100, 100]`.
    pub const MAX_COMMAND_SCALE: u8 = 100;

    const TICK_VAR: &'static str = "MANUAL_CTRL_TICK_MS";
    const SURFACE_VAR: &'static str = "MANUAL_CTRL_SURFACE";
    const SCALE_VAR: &'static str = "MANUAL_CTRL_SCALE";

    /// Creates a validated configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the interval is zero, the surface dimension is
    /// not a positive finite number or the scale lies outside `1..=100`.
    pub fn new(
        tick_interval: Duration,
        surface_dimension: f64,
        command_scale: u8,
    ) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !surface_dimension.is_finite() || surface_dimension <= 0.0 {
            return Err(ConfigError::NonPositiveSurface(surface_dimension));
        }
        if command_scale == 0 || command_scale > Self::MAX_COMMAND_SCALE {
            return Err(ConfigError::ScaleOutOfRange(command_scale));
        }
        Ok(Self { tick_interval, surface_dimension, command_scale })
    }

    /// Reads the configuration from the process environment, falling back to
    /// the defaults for every unset variable.
    ///
    /// # Errors
    /// See [`ControlConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidNumber`] if a present value does not parse,
    /// or any validation error of [`ControlConfig::new`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String> {
        let tick_interval = match lookup(Self::TICK_VAR) {
            Some(raw) => Duration::from_millis(parse_var(Self::TICK_VAR, &raw)?),
            None => Self::DEF_TICK_INTERVAL,
        };
        let surface_dimension = match lookup(Self::SURFACE_VAR) {
            Some(raw) => parse_var(Self::SURFACE_VAR, &raw)?,
            None => Self::DEF_SURFACE_DIMENSION,
        };
        let command_scale = match lookup(Self::SCALE_VAR) {
            Some(raw) => parse_var(Self::SCALE_VAR, &raw)?,
            None => Self::DEF_COMMAND_SCALE,
        };
        Self::new(tick_interval, surface_dimension, command_scale)
    }

    pub fn tick_interval(&self) -> Duration { self.tick_interval }
    pub fn surface_dimension(&self) -> f64 { self.surface_dimension }
    pub fn command_scale(&self) -> u8 { self.command_scale }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_interval: Self::DEF_TICK_INTERVAL,
            surface_dimension: Self::DEF_SURFACE_DIMENSION,
            command_scale: Self::DEF_COMMAND_SCALE,
        }
    }
}

/// Parameters of the simulated drone driven by the binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// How long manual control is held before landing.
    run_time: Duration,
    /// Activations the simulated session refuses before granting control.
    activation_failures: u32,
    /// Delay after takeoff at which the simulated session revokes control.
    disengage_after: Option<Duration>,
}

impl SimConfig {
    pub const DEF_RUN_TIME: Duration = Duration::from_secs(5);
    pub const DEF_ACTIVATION_FAILURES: u32 = 2;

    const RUN_VAR: &'static str = "SIM_RUN_S";
    const FAILURES_VAR: &'static str = "SIM_ACTIVATION_FAILURES";
    const DISENGAGE_VAR: &'static str = "SIM_DISENGAGE_AFTER_S";

    /// Reads the simulation parameters from the process environment.
    ///
    /// # Errors
    /// See [`SimConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the simulation parameters from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidNumber`] if a present value does not parse
    /// as a non-negative number of seconds or count.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String> {
        let run_time = match lookup(Self::RUN_VAR) {
            Some(raw) => parse_secs(Self::RUN_VAR, &raw)?,
            None => Self::DEF_RUN_TIME,
        };
        let activation_failures = match lookup(Self::FAILURES_VAR) {
            Some(raw) => parse_var(Self::FAILURES_VAR, &raw)?,
            None => Self::DEF_ACTIVATION_FAILURES,
        };
        let disengage_after =
            lookup(Self::DISENGAGE_VAR).map(|raw| parse_secs(Self::DISENGAGE_VAR, &raw)).transpose()?;
        Ok(Self { run_time, activation_failures, disengage_after })
    }

    pub fn run_time(&self) -> Duration { self.run_time }
    pub fn activation_failures(&self) -> u32 { self.activation_failures }
    pub fn disengage_after(&self) -> Option<Duration> { self.disengage_after }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            run_time: Self::DEF_RUN_TIME,
            activation_failures: Self::DEF_ACTIVATION_FAILURES,
            disengage_after: None,
        }
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = parse_var(var, raw)?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.to_string() })
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber { var, value: raw.to_string() })
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
    ZeroTickInterval,
    NonPositiveSurface(f64),
    ScaleOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} is not a valid number: {value:?}")
            }
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be non-zero"),
            ConfigError::NonPositiveSurface(dim) => {
                write!(f, "surface dimension must be positive, got {dim}")
            }
            ConfigError::ScaleOutOfRange(scale) => {
                write!(f, "command scale must lie within 1..=100, got {scale}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
