//! Sensor execution loop.
//!
//! Hosts that call [`crate::Sensor::poke`] themselves do not need this;
//! [`SensorRunner`] supplies the poll cadence locally with a fluent,
//! builder-style configuration.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::context::TaskContext;
use crate::task::{Sensor, TaskError};

/// Drives a [`Sensor`] at a fixed interval until it reports truthy or the
/// deadline elapses.
pub struct SensorRunner {
    poke_interval: Duration,
    timeout: Duration,
    initial_delay: Duration,
}

impl SensorRunner {
    pub fn new() -> Self {
        Self {
            poke_interval: Duration::from_secs(60),
            timeout: Duration::from_secs(86_400),
            initial_delay: Duration::ZERO,
        }
    }

    /// Set the interval between pokes (default: 60s).
    pub fn poke_interval(mut self, interval: Duration) -> Self {
        self.poke_interval = interval;
        self
    }

    /// Set the overall deadline (default: 24h).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a delay before the first poke (default: none). Used for the
    /// monitor's grace period when sensing a just-triggered run.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Poke until truthy. Fails with [`TaskError::SensorTimeout`] when the
    /// deadline elapses first; sensor errors propagate immediately.
    pub async fn run(&self, sensor: &dyn Sensor, ctx: &TaskContext) -> Result<(), TaskError> {
        tokio::time::sleep(self.initial_delay).await;

        let started = Instant::now();
        loop {
            debug!(sensor = sensor.name(), elapsed_ms = started.elapsed().as_millis() as u64, "poking sensor");

            if sensor.poke(ctx).await? {
                info!(
                    sensor = sensor.name(),
                    elapsed_secs = started.elapsed().as_secs(),
                    "sensor condition met"
                );
                return Ok(());
            }

            if started.elapsed() >= self.timeout {
                return Err(TaskError::SensorTimeout {
                    name: sensor.name().to_string(),
                    timeout_secs: self.timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.poke_interval).await;
        }
    }
}

impl Default for SensorRunner {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Reports false until `ready_after` pokes have happened.
    struct CountingSensor {
        pokes: AtomicU32,
        ready_after: u32,
    }

    #[async_trait]
    impl Sensor for CountingSensor {
        fn name(&self) -> &str {
            "counting"
        }

        async fn poke(&self, _ctx: &TaskContext) -> Result<bool, TaskError> {
            let n = self.pokes.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(n >= self.ready_after)
        }
    }

    struct FailingSensor;

    #[async_trait]
    impl Sensor for FailingSensor {
        fn name(&self) -> &str {
            "failing"
        }

        async fn poke(&self, _ctx: &TaskContext) -> Result<bool, TaskError> {
            Err(TaskError::Core(stitch_core::CoreError::Configuration(
                "broken".into(),
            )))
        }
    }

    #[tokio::test]
    async fn returns_after_first_truthy_poke() {
        let sensor = CountingSensor { pokes: AtomicU32::new(0), ready_after: 3 };
        let runner = SensorRunner::new()
            .poke_interval(Duration::from_millis(5))
            .timeout(Duration::from_secs(5));

        runner.run(&sensor, &TaskContext::new()).await.unwrap();
        assert_eq!(sensor.pokes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn times_out_when_never_ready() {
        let sensor = CountingSensor { pokes: AtomicU32::new(0), ready_after: u32::MAX };
        let runner = SensorRunner::new()
            .poke_interval(Duration::from_millis(5))
            .timeout(Duration::from_millis(30));

        let err = runner.run(&sensor, &TaskContext::new()).await.unwrap_err();
        assert!(matches!(err, TaskError::SensorTimeout { .. }));
        // The sensor was actually poked along the way.
        assert!(sensor.pokes.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn sensor_errors_propagate_immediately() {
        let runner = SensorRunner::new()
            .poke_interval(Duration::from_millis(5))
            .timeout(Duration::from_secs(5));

        let err = runner.run(&FailingSensor, &TaskContext::new()).await.unwrap_err();
        assert!(matches!(err, TaskError::Core(_)));
    }

    #[tokio::test]
    async fn initial_delay_runs_before_first_poke() {
        let sensor = CountingSensor { pokes: AtomicU32::new(0), ready_after: 1 };
        let runner = SensorRunner::new()
            .initial_delay(Duration::from_millis(20))
            .timeout(Duration::from_secs(5));

        let started = Instant::now();
        runner.run(&sensor, &TaskContext::new()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(sensor.pokes.load(Ordering::SeqCst), 1);
    }
}
