//! Task and sensor integration for a host scheduler.
//!
//! The host invokes [`Task::execute`] once, or [`Sensor::poke`] repeatedly
//! until truthy; [`SensorRunner`] supplies that cadence for hosts that want
//! it driven locally. Concrete Stitch tasks live in [`stitch`].

pub mod context;
pub mod runner;
pub mod stitch;
pub mod task;

pub use context::TaskContext;
pub use runner::SensorRunner;
pub use stitch::{ExtractionSensor, RunAndMonitorTask, TriggerExtractionTask};
pub use task::{Sensor, Task, TaskError};
