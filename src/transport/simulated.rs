//! Stand-in transport that fakes network latency

use super::traits::{Submission, Transport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// Waits for a fixed delay, then reports success (or failure when configured)
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    fail: bool,
}

impl SimulatedTransport {
    /// Default simulated round trip (1.5 seconds)
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Make every send fail after the delay
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn send(&self, submission: &Submission) -> Result<(), TransportError> {
        match serde_json::to_string(submission) {
            Ok(json) => tracing::debug!(%json, "form submission"),
            Err(err) => tracing::warn!("could not encode submission for logging: {err}"),
        }

        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(TransportError::Unavailable(
                "simulated network failure".to_string(),
            ));
        }
        tracing::info!(id = %submission.id, "submission delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn submission() -> Submission {
        Submission::new(vec![("name".to_string(), "Jane".to_string())])
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_waits_for_delay() {
        let transport = SimulatedTransport::default();
        let started = Instant::now();
        transport.send(&submission()).await.unwrap();
        assert!(started.elapsed() >= SimulatedTransport::DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_is_pending_until_delay() {
        let transport = SimulatedTransport::default();
        let submission = submission();
        let mut send = tokio_test::task::spawn(transport.send(&submission));

        tokio_test::assert_pending!(send.poll());
        tokio::time::advance(SimulatedTransport::DEFAULT_DELAY).await;
        tokio_test::assert_ready_ok!(send.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_transport_reports_error() {
        let transport = SimulatedTransport::new(Duration::from_millis(10)).failing();
        let result = transport.send(&submission()).await;
        assert!(matches!(result, Err(TransportError::Unavailable(_))));
    }

    #[test]
    fn test_submission_value_lookup() {
        let submission = submission();
        assert_eq!(submission.value("name"), Some("Jane"));
        assert_eq!(submission.value("email"), None);
    }
}
