//! Task and sensor traits: the seam the host scheduler drives.

use async_trait::async_trait;
use thiserror::Error;

use stitch_core::CoreError;
use stitch_extraction::ExtractionError;

use crate::context::TaskContext;

/// Errors surfaced to the host as task failures.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The sensor's awaited condition never held within its deadline.
    #[error("sensor '{name}' timed out after {timeout_secs}s")]
    SensorTimeout { name: String, timeout_secs: u64 },
}

/// A unit of work the host executes once per scheduled run.
///
/// Failures propagate to the host, which applies its own retry policy.
#[async_trait]
pub trait Task: Send + Sync {
    /// Human-readable name (used in logging).
    fn name(&self) -> &str;

    /// Run the task to completion.
    async fn execute(&self, ctx: &TaskContext) -> Result<(), TaskError>;
}

/// A condition the host polls for.
///
/// `Ok(true)` means the awaited condition holds; `Ok(false)` means not yet,
/// and the host (or [`crate::SensorRunner`]) calls again after its interval.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Human-readable name (used in logging).
    fn name(&self) -> &str;

    /// Check the condition once.
    async fn poke(&self, ctx: &TaskContext) -> Result<bool, TaskError>;
}
