use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Per-invocation context handed to tasks and sensors by the host.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Correlation id for this task run.
    pub run_id: Uuid,
    /// Logical start of the task run. Monitoring staleness comparisons are
    /// relative to this, not to trigger completion.
    pub start_time: DateTime<Utc>,
}

impl TaskContext {
    /// Context starting now.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            start_time: Utc::now(),
        }
    }

    /// Context with an explicit start time (host-provided schedules, tests).
    pub fn starting_at(start_time: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            start_time,
        }
    }
}

impl Default for TaskContext {
    fn default() -> Self {
        Self::new()
    }
}
