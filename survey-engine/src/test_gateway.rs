//! Test gateway for exercising the submission pipeline without storage.
//!
//! `TestGateway` records every submission it receives and either accepts it
//! with a fresh response id or fails with a configured message.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_engine::{EngineConfig, RespondentType, SurveyRuntime, TestGateway};
//!
//! let gateway = TestGateway::new();
//! let config = EngineConfig::default();
//! let mut runtime = SurveyRuntime::new(survey, RespondentType::External, &config)?;
//! runtime.set_answer("q1", true);
//! runtime.submit(&gateway).await?;
//!
//! assert_eq!(gateway.calls(), 1);
//! ```

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::{ResponseId, Submission, SubmissionGateway, SurveyError};

/// A gateway that records submissions instead of writing them.
#[derive(Debug, Default)]
pub struct TestGateway {
    submissions: Mutex<Vec<Submission>>,
    failure: Option<String>,
}

impl TestGateway {
    /// Create a gateway that accepts every submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway that rejects every submission with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            submissions: Mutex::default(),
            failure: Some(message.into()),
        }
    }

    /// Number of submit calls received, failed ones included.
    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    /// Every submission received, in call order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.lock().clone()
    }

    /// The most recent submission, if any.
    pub fn last_submission(&self) -> Option<Submission> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Submission>> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SubmissionGateway for TestGateway {
    async fn submit(&self, submission: Submission) -> Result<ResponseId, SurveyError> {
        self.lock().push(submission);

        match &self.failure {
            Some(message) => Err(SurveyError::backend(anyhow::anyhow!(message.clone()))),
            None => Ok(ResponseId::generate()),
        }
    }
}
