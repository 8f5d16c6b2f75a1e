//! Scaling action execution.
//!
//! No real infrastructure is touched here; [`SimulatedExecutor`] stands
//! in for a cloud provider client. A real executor implements
//! [`ActionExecutor`] without the decision engine changing.

use std::time::Duration;

use tracing::{error, info};

use smartscale_core::ScalingDecision;

/// Seam for performing scaling actions.
///
/// Returns `true` on success. Failures are reported, never raised.
pub trait ActionExecutor: Send + Sync {
    fn execute(&self, decision: ScalingDecision) -> impl Future<Output = bool> + Send;
}

/// Executor that pretends to call a cloud API.
///
/// `NoAction` completes immediately; scaling actions wait out a fixed
/// delay representing the API round trip. An injected failure makes
/// scaling actions report `false`.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    delay: Duration,
    inject_failure: bool,
}

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(1),
            inject_failure: false,
        }
    }

    /// Override the simulated round-trip delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make scaling actions fail, for exercising the failure path.
    pub fn with_injected_failure(mut self) -> Self {
        self.inject_failure = true;
        self
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for SimulatedExecutor {
    async fn execute(&self, decision: ScalingDecision) -> bool {
        if decision == ScalingDecision::NoAction {
            info!("no scaling action needed");
            return true;
        }

        info!(action = %decision, "simulating scaling action");
        tokio::time::sleep(self.delay).await;

        if self.inject_failure {
            error!(action = %decision, "scaling action failed");
            return false;
        }

        info!(action = %decision, "scaling action simulated");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn no_action_succeeds_without_delay() {
        let executor = SimulatedExecutor::new().with_delay(Duration::from_secs(10));
        let start = Instant::now();
        assert!(executor.execute(ScalingDecision::NoAction).await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn scaling_actions_succeed_after_the_delay() {
        let executor = SimulatedExecutor::new().with_delay(Duration::from_millis(20));
        let start = Instant::now();
        assert!(executor.execute(ScalingDecision::ScaleUp).await);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(executor.execute(ScalingDecision::ScaleDown).await);
    }

    #[tokio::test]
    async fn injected_failure_reports_false() {
        let executor = SimulatedExecutor::new()
            .with_delay(Duration::ZERO)
            .with_injected_failure();
        assert!(!executor.execute(ScalingDecision::ScaleUp).await);
        // NoAction never reaches the failing path.
        assert!(executor.execute(ScalingDecision::NoAction).await);
    }
}
