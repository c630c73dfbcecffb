//! Case types of [`crate::Status`].

use std::time::SystemTime;

/// The job is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Active {
    /// What the job is currently doing.
    pub description: String,
}

impl Active {
    /// Creates an active status.
    #[must_use]
    pub fn new(description: String) -> Self {
        Self { description }
    }
}

/// The job failed and is scheduled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
    /// Attempt number, starting at 1.
    pub attempt: u32,
}

/// The job was given up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted {
    /// When the job was cancelled.
    pub cancellation_time: SystemTime,
}
