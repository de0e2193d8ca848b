//! Server-side submission gateways.
//!
//! Both gateways write a `Response` row and then one `Answer` row per answered
//! question. If any answer write fails, every row written so far is deleted
//! again, so a submission is stored completely or not at all.
//!
//! - `StandardGateway` applies the normal access policy and drops personal info.
//! - `ElevatedGateway` serves the one survey category anonymous respondents
//!   cannot otherwise write to; it bypasses the protected-category check and
//!   stores personal info in the response metadata.
//! - `SubmissionRouter` picks one of the two by survey type.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use survey_engine_types::{
    Answer, AnswerId, ElementId, RespondentType, Repository, Response, ResponseId, StoreError,
    Submission, SubmissionGateway, Survey, SurveyError,
};

use crate::config::EngineConfig;

/// Metadata key the elevated gateway stores personal info under.
pub const PERSONAL_INFO_METADATA_KEY: &str = "personalInfo";

/// The three tables a submission touches.
#[derive(Clone)]
pub struct SurveyTables {
    pub surveys: Arc<dyn Repository<Survey>>,
    pub responses: Arc<dyn Repository<Response>>,
    pub answers: Arc<dyn Repository<Answer>>,
}

impl SurveyTables {
    pub fn new(
        surveys: impl Repository<Survey> + 'static,
        responses: impl Repository<Response> + 'static,
        answers: impl Repository<Answer> + 'static,
    ) -> Self {
        Self {
            surveys: Arc::new(surveys),
            responses: Arc::new(responses),
            answers: Arc::new(answers),
        }
    }

    async fn load_survey(&self, submission: &Submission) -> Result<Survey, SurveyError> {
        let survey = self
            .surveys
            .get(&submission.survey_id)
            .await?
            .ok_or(SurveyError::NotFound)?;

        if !survey.is_active() {
            return Err(SurveyError::Unavailable(
                "survey is not accepting responses".to_string(),
            ));
        }
        Ok(survey)
    }

    /// Write the response and its answers, rolling back on failure.
    async fn write(
        &self,
        survey: &Survey,
        submission: Submission,
    ) -> Result<ResponseId, SurveyError> {
        let answerable: HashSet<&ElementId> = survey
            .answerable_elements()
            .map(|element| element.id())
            .collect();
        let total = submission.answers.len();
        let inputs: Vec<_> = submission
            .answers
            .into_iter()
            .filter(|input| answerable.contains(&input.question_id))
            .collect();
        if inputs.len() < total {
            tracing::debug!(
                survey = %survey.id,
                dropped = total - inputs.len(),
                "dropping answers for unknown questions"
            );
        }

        let response = self
            .responses
            .insert(
                Response::new(survey.id, submission.respondent_type)
                    .with_metadata(submission.metadata),
            )
            .await?;

        let mut written = Vec::with_capacity(inputs.len());
        for input in inputs {
            let answer = Answer::new(response.id, input.question_id, input.value);
            match self.answers.insert(answer).await {
                Ok(stored) => written.push(stored.id),
                Err(err) => {
                    self.roll_back(&response, &written).await;
                    return Err(err.into());
                }
            }
        }

        tracing::info!(
            survey = %survey.id,
            response = %response.id,
            answers = written.len(),
            "stored survey response"
        );
        Ok(response.id)
    }

    async fn roll_back(&self, response: &Response, answers: &[AnswerId]) {
        tracing::warn!(
            response = %response.id,
            answers = answers.len(),
            "answer write failed, rolling back response"
        );
        for id in answers {
            if let Err(err) = self.answers.delete(id).await {
                tracing::warn!(answer = %id, error = %err, "failed to roll back answer");
            }
        }
        if let Err(err) = self.responses.delete(&response.id).await {
            tracing::warn!(response = %response.id, error = %err, "failed to roll back response");
        }
    }
}

/// Gateway applying the normal access policy.
#[derive(Clone)]
pub struct StandardGateway {
    tables: SurveyTables,
    config: EngineConfig,
}

impl StandardGateway {
    pub fn new(tables: SurveyTables, config: &EngineConfig) -> Self {
        Self {
            tables,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for StandardGateway {
    async fn submit(&self, mut submission: Submission) -> Result<ResponseId, SurveyError> {
        let survey = self.tables.load_survey(&submission).await?;

        if self.config.is_protected(&survey.survey_type)
            && submission.respondent_type == RespondentType::External
        {
            return Err(StoreError::AccessDenied(format!(
                "anonymous responses to {} surveys are not allowed",
                survey.survey_type
            ))
            .into());
        }

        if submission.personal_info.take().is_some() {
            tracing::debug!(survey = %survey.id, "standard gateway ignores personal info");
        }
        self.tables.write(&survey, submission).await
    }
}

/// Gateway for the elevated survey category.
#[derive(Clone)]
pub struct ElevatedGateway {
    tables: SurveyTables,
    config: EngineConfig,
}

impl ElevatedGateway {
    pub fn new(tables: SurveyTables, config: &EngineConfig) -> Self {
        Self {
            tables,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for ElevatedGateway {
    async fn submit(&self, mut submission: Submission) -> Result<ResponseId, SurveyError> {
        let survey = self.tables.load_survey(&submission).await?;

        if !self.config.is_elevated(&survey.survey_type) {
            return Err(StoreError::AccessDenied(format!(
                "{} surveys cannot use the elevated gateway",
                survey.survey_type
            ))
            .into());
        }

        if let Some(info) = submission.personal_info.take() {
            let info: serde_json::Map<_, _> = info
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect();
            submission
                .metadata
                .insert(PERSONAL_INFO_METADATA_KEY.to_string(), info.into());
        }
        self.tables.write(&survey, submission).await
    }
}

/// Routes submissions to the elevated or standard gateway by survey type.
#[derive(Clone)]
pub struct SubmissionRouter {
    config: EngineConfig,
    standard: Arc<dyn SubmissionGateway>,
    elevated: Arc<dyn SubmissionGateway>,
}

impl SubmissionRouter {
    pub fn new(
        config: &EngineConfig,
        standard: impl SubmissionGateway + 'static,
        elevated: impl SubmissionGateway + 'static,
    ) -> Self {
        Self {
            config: config.clone(),
            standard: Arc::new(standard),
            elevated: Arc::new(elevated),
        }
    }

    /// Router over a standard and an elevated gateway sharing `tables`.
    pub fn for_tables(tables: SurveyTables, config: &EngineConfig) -> Self {
        Self::new(
            config,
            StandardGateway::new(tables.clone(), config),
            ElevatedGateway::new(tables, config),
        )
    }
}

#[async_trait]
impl SubmissionGateway for SubmissionRouter {
    async fn submit(&self, submission: Submission) -> Result<ResponseId, SurveyError> {
        if self.config.is_elevated(&submission.survey_type) {
            tracing::debug!(survey = %submission.survey_id, "routing to elevated gateway");
            self.elevated.submit(submission).await
        } else {
            self.standard.submit(submission).await
        }
    }
}
