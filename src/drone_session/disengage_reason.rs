use std::fmt;

/// Externally supplied explanation of why manual control authority was revoked,
/// e.g. a failsafe trigger or a lost connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisengageReason {
    title: String,
    details: Option<String>,
}

impl DisengageReason {
    pub fn new(title: impl Into<String>) -> Self { Self { title: title.into(), details: None } }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The string logged when the control loop observes this reason.
    pub fn display(&self) -> String { self.to_string() }
}

impl fmt::Display for DisengageReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {details}", self.title),
            None => write!(f, "{}", self.title),
        }
    }
}
