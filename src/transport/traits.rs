//! Trait abstraction for the form transport to enable mocking in tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors a transport can report back to the submitter
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    #[allow(dead_code)] // reported by transports that reach a real endpoint
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("send task ended before reporting a result")]
    Interrupted,
}

/// A validated form, ready to be sent
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Field name and value pairs in document order
    pub fields: Vec<(String, String)>,
}

impl Submission {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            fields,
        }
    }

    #[cfg(test)]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Where submitted forms are sent
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a submission. Resolves once the far end has answered.
    async fn send(&self, submission: &Submission) -> Result<(), TransportError>;
}
