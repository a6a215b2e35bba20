//! Run ID for log correlation
//!
//! Generates a unique UUID for each CLI invocation so all log lines emitted
//! during one run can be correlated.

use uuid::Uuid;

/// Run ID wrapper type attached to the root tracing span of an invocation
#[derive(Debug, Clone, Copy)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
