//! Stitch extraction trigger and monitor.
//!
//! Provides [`StitchClient`] for kicking off a data-sync run for a source
//! and following the paginated status feed until the run completes, fails,
//! or the monitoring deadline elapses.

pub mod client;
pub mod error;
pub mod monitor;
pub mod types;

pub use client::StitchClient;
pub use error::ExtractionError;
pub use monitor::ExtractionStatus;
pub use types::{ExtractionJob, ExtractionStatusItem, PageLinks, StatusPage};
