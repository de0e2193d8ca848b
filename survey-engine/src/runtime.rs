//! The respondent-facing state machine.
//!
//! A survey is walked as `welcome? -> personal info? -> page 0..N-1 -> thank you`.
//! Advancing is gated by validation of the current step, and the last page is
//! finished with a single `submit` call through a `SubmissionGateway`.

use survey_engine_types::{
    AnswerInput, AnswerValue, Answers, ElementId, Page, PersonalInfo, RespondentType,
    ResponseId, Submission, SubmissionGateway, Survey, SurveyError,
};

use crate::config::EngineConfig;
use crate::validation::{ValidationError, validate_page, validate_personal_info};

/// A respondent-visible step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    PersonalInfo,
    /// A survey page, by index.
    Page(usize),
    ThankYou,
}

impl Step {
    /// Numeric step index: welcome is -1, personal info -2, pages `0..N`,
    /// and the thank-you screen is `N`.
    pub fn index(&self, total_pages: usize) -> isize {
        match self {
            Self::Welcome => -1,
            Self::PersonalInfo => -2,
            Self::Page(index) => *index as isize,
            Self::ThankYou => total_pages as isize,
        }
    }
}

/// Error type for runtime transitions.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The survey has no pages to show.
    #[error("Survey has no pages")]
    NoPages,

    /// The current step has an unmet requirement.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `advance` was called on the last page.
    #[error("The last page must be submitted")]
    SubmitRequired,

    /// `submit` was called before reaching the last page.
    #[error("Only the last page can be submitted")]
    NotOnLastPage,

    /// The response was already submitted.
    #[error("This survey has already been submitted")]
    Finished,

    /// The gateway rejected the submission; carries the prefixed message.
    #[error("{0}")]
    Submission(String),
}

/// One respondent's pass through a survey.
#[derive(Debug, Clone)]
pub struct SurveyRuntime {
    survey: Survey,
    respondent_type: RespondentType,
    submit_error_prefix: String,
    step: Step,
    answers: Answers,
    personal_info: PersonalInfo,
    metadata: serde_json::Map<String, serde_json::Value>,
    error: Option<String>,
    response_id: Option<ResponseId>,
}

impl SurveyRuntime {
    /// Start a runtime at the first present step.
    pub fn new(
        survey: Survey,
        respondent_type: RespondentType,
        config: &EngineConfig,
    ) -> Result<Self, RuntimeError> {
        if survey.total_pages() == 0 {
            return Err(RuntimeError::NoPages);
        }

        let step = if survey.settings.has_welcome() {
            Step::Welcome
        } else if survey.settings.has_personal_info() {
            Step::PersonalInfo
        } else {
            Step::Page(0)
        };
        tracing::debug!(survey = %survey.id, ?step, "starting survey runtime");

        Ok(Self {
            survey,
            respondent_type,
            submit_error_prefix: config.submit_error_prefix.clone(),
            step,
            answers: Answers::new(),
            personal_info: PersonalInfo::new(),
            metadata: serde_json::Map::new(),
            error: None,
            response_id: None,
        })
    }

    /// Attach a metadata entry sent with the submission.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Numeric index of the current step (see `Step::index`).
    pub fn step_index(&self) -> isize {
        self.step.index(self.total_pages())
    }

    pub fn total_pages(&self) -> usize {
        self.survey.total_pages()
    }

    /// The page being shown, if the current step is a page.
    pub fn current_page(&self) -> Option<&Page> {
        match self.step {
            Step::Page(index) => self.survey.page(index),
            _ => None,
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.step == Step::Page(self.total_pages() - 1)
    }

    pub fn is_finished(&self) -> bool {
        self.step == Step::ThankYou
    }

    /// Fraction of pages completed, for progress bars.
    pub fn progress(&self) -> f64 {
        match self.step {
            Step::Welcome | Step::PersonalInfo => 0.0,
            Step::Page(index) => index as f64 / self.total_pages() as f64,
            Step::ThankYou => 1.0,
        }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        &self.personal_info
    }

    /// The inline error for the current step, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the stored response once submitted.
    pub fn response_id(&self) -> Option<ResponseId> {
        self.response_id
    }

    /// Record an answer; clears the inline error.
    pub fn set_answer(&mut self, id: impl Into<ElementId>, value: impl Into<AnswerValue>) {
        if self.is_finished() {
            return;
        }
        self.answers.insert(id, value);
        self.error = None;
    }

    /// Forget an answer; clears the inline error.
    pub fn clear_answer(&mut self, id: &ElementId) {
        if self.is_finished() {
            return;
        }
        self.answers.remove(id);
        self.error = None;
    }

    /// Record a personal-info field; clears the inline error.
    pub fn set_personal_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.is_finished() {
            return;
        }
        self.personal_info.insert(key.into(), value.into());
        self.error = None;
    }

    /// Move to the next step if the current one validates.
    ///
    /// The last page cannot be advanced past; it is finished with `submit`.
    pub fn advance(&mut self) -> Result<Step, RuntimeError> {
        let current = self.step;
        let next = match current {
            Step::Welcome if self.survey.settings.has_personal_info() => Step::PersonalInfo,
            Step::Welcome => Step::Page(0),
            Step::PersonalInfo => {
                self.check(validate_personal_info(
                    &self.survey.settings.personal_info_fields,
                    &self.personal_info,
                ))?;
                Step::Page(0)
            }
            Step::Page(_) if self.is_last_page() => return Err(RuntimeError::SubmitRequired),
            Step::Page(index) => {
                self.validate_current_page()?;
                Step::Page(index + 1)
            }
            Step::ThankYou => return Err(RuntimeError::Finished),
        };

        self.move_to(next);
        Ok(next)
    }

    /// Move to the previous present step. Returns false if there is none.
    pub fn back(&mut self) -> bool {
        match self.previous_step() {
            Some(step) => {
                self.move_to(step);
                true
            }
            None => false,
        }
    }

    /// Check if `back` would move.
    pub fn can_go_back(&self) -> bool {
        self.previous_step().is_some()
    }

    fn previous_step(&self) -> Option<Step> {
        let has_welcome = self.survey.settings.has_welcome();
        let has_personal_info = self.survey.settings.has_personal_info();

        match self.step {
            Step::Page(index) if index > 0 => Some(Step::Page(index - 1)),
            Step::Page(_) if has_personal_info => Some(Step::PersonalInfo),
            Step::Page(_) | Step::PersonalInfo if has_welcome => Some(Step::Welcome),
            Step::Page(_) | Step::PersonalInfo | Step::Welcome | Step::ThankYou => None,
        }
    }

    /// Validate the last page and send the response through `gateway`.
    ///
    /// On success the runtime moves to the thank-you step and makes no
    /// further calls. On failure the prefixed error is shown on the current
    /// page and the runtime stays put, so the respondent can retry.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<ResponseId, RuntimeError>
    where
        G: SubmissionGateway + ?Sized,
    {
        if self.is_finished() {
            return Err(RuntimeError::Finished);
        }
        if !self.is_last_page() {
            return Err(RuntimeError::NotOnLastPage);
        }
        self.validate_current_page()?;

        let submission = self.build_submission();
        let answer_count = submission.answers.len();

        match gateway.submit(submission).await {
            Ok(response_id) => {
                tracing::info!(
                    survey = %self.survey.id,
                    response = %response_id,
                    answers = answer_count,
                    "survey submitted"
                );
                self.response_id = Some(response_id);
                self.move_to(Step::ThankYou);
                Ok(response_id)
            }
            Err(err) => Err(self.submission_failed(err)),
        }
    }

    /// Build the payload for the current answers.
    ///
    /// Answers are emitted in element order. Answers for static elements or
    /// for elements no longer in the survey are dropped, as are blank values.
    pub fn build_submission(&self) -> Submission {
        let answers: Vec<AnswerInput> = self
            .survey
            .answerable_elements()
            .filter_map(|element| {
                let value = self.answers.get(element.id())?;
                (!value.is_blank()).then(|| AnswerInput {
                    question_id: element.id().clone(),
                    value: value.clone(),
                })
            })
            .collect();

        let orphans = self
            .answers
            .iter()
            .filter(|(id, _)| {
                self.survey
                    .find_element(id)
                    .is_none_or(|element| element.is_static())
            })
            .count();
        if orphans > 0 {
            tracing::debug!(
                survey = %self.survey.id,
                orphans,
                "dropping answers without a question"
            );
        }

        let personal_info = (self.survey.settings.has_personal_info()
            && !self.personal_info.is_empty())
        .then(|| self.personal_info.clone());

        Submission {
            survey_id: self.survey.id,
            survey_type: self.survey.survey_type.clone(),
            respondent_type: self.respondent_type,
            answers,
            metadata: self.metadata.clone(),
            personal_info,
        }
    }

    fn validate_current_page(&mut self) -> Result<(), RuntimeError> {
        let result = match self.current_page() {
            Some(page) => validate_page(page.elements(), &self.answers),
            None => Ok(()),
        };
        self.check(result)
    }

    fn check(&mut self, result: Result<(), ValidationError>) -> Result<(), RuntimeError> {
        result.map_err(|err| {
            tracing::debug!(field = %err.field, step = ?self.step, "step blocked by validation");
            self.error = Some(err.message.clone());
            RuntimeError::Validation(err)
        })
    }

    fn submission_failed(&mut self, err: SurveyError) -> RuntimeError {
        let message = format!("{}{}", self.submit_error_prefix, err);
        tracing::warn!(survey = %self.survey.id, error = %err, "survey submission failed");
        self.error = Some(message.clone());
        RuntimeError::Submission(message)
    }

    fn move_to(&mut self, step: Step) {
        tracing::debug!(survey = %self.survey.id, from = ?self.step, to = ?step, "step transition");
        self.step = step;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use survey_engine_types::{
        Element, ElementType, PersonalInfoField, PersonalInfoKind, SurveySettings, WelcomeScreen,
    };

    use super::*;
    use crate::test_gateway::TestGateway;

    fn yes_no_page(id: &str) -> Page {
        Page::new(format!("Page {id}")).with_element(
            Element::new(ElementType::YesNo)
                .with_id(id)
                .with_label("Continue?")
                .with_required(true),
        )
    }

    fn one_page_survey() -> Survey {
        Survey::new("One", "general").with_pages(vec![yes_no_page("q1")])
    }

    fn two_page_survey() -> Survey {
        Survey::new("Check-in", "general").with_pages(vec![yes_no_page("q1"), yes_no_page("q2")])
    }

    fn runtime(survey: Survey) -> SurveyRuntime {
        SurveyRuntime::new(survey, RespondentType::External, &EngineConfig::default()).unwrap()
    }

    fn with_intro(survey: Survey) -> Survey {
        let settings = SurveySettings {
            welcome: WelcomeScreen {
                enabled: true,
                ..WelcomeScreen::default()
            },
            personal_info_fields: vec![
                PersonalInfoField::new("email", "Email")
                    .with_kind(PersonalInfoKind::Email)
                    .required(),
            ],
            ..SurveySettings::default()
        };
        survey.with_settings(settings)
    }

    #[test]
    fn zero_pages_is_rejected() {
        let survey = Survey::new("Empty", "general").with_pages(Vec::new());
        let result = SurveyRuntime::new(survey, RespondentType::External, &EngineConfig::default());
        assert!(matches!(result, Err(RuntimeError::NoPages)));
    }

    #[test]
    fn starts_on_first_page_without_intro_steps() {
        let runtime = runtime(two_page_survey());
        assert_eq!(runtime.step(), Step::Page(0));
        assert_eq!(runtime.step_index(), 0);
    }

    #[test]
    fn intro_steps_come_first() {
        let mut runtime = runtime(with_intro(two_page_survey()));
        assert_eq!(runtime.step_index(), -1);

        runtime.advance().unwrap();
        assert_eq!(runtime.step_index(), -2);

        // Required email is missing.
        assert!(runtime.advance().is_err());
        assert!(runtime.error_message().is_some());

        runtime.set_personal_info("email", "sam@example.org");
        assert!(runtime.error_message().is_none());
        assert_eq!(runtime.advance().unwrap(), Step::Page(0));
    }

    #[test]
    fn unanswered_required_question_blocks_advance() {
        let mut runtime = runtime(two_page_survey());

        let err = runtime.advance().unwrap_err();
        assert!(matches!(err, RuntimeError::Validation(_)));
        assert_eq!(runtime.step(), Step::Page(0));
        assert!(!runtime.error_message().unwrap_or_default().is_empty());

        runtime.set_answer("q1", false);
        assert!(runtime.error_message().is_none());
        assert_eq!(runtime.advance().unwrap(), Step::Page(1));
        assert_eq!(runtime.step_index(), 1);
    }

    #[test]
    fn advance_on_last_page_requires_submit() {
        let mut runtime = runtime(one_page_survey());
        runtime.set_answer("q1", true);
        assert!(matches!(runtime.advance(), Err(RuntimeError::SubmitRequired)));
    }

    #[test]
    fn back_walks_present_steps() {
        let mut runtime = runtime(with_intro(two_page_survey()));
        runtime.advance().unwrap();
        runtime.set_personal_info("email", "sam@example.org");
        runtime.advance().unwrap();
        runtime.set_answer("q1", true);
        runtime.advance().unwrap();

        assert!(runtime.back());
        assert_eq!(runtime.step(), Step::Page(0));
        assert!(runtime.back());
        assert_eq!(runtime.step(), Step::PersonalInfo);
        assert!(runtime.back());
        assert_eq!(runtime.step(), Step::Welcome);
        assert!(!runtime.back());
    }

    #[test]
    fn back_from_first_page_without_intro_stays() {
        let mut runtime = runtime(two_page_survey());
        assert!(!runtime.back());
        assert_eq!(runtime.step(), Step::Page(0));
    }

    #[tokio::test]
    async fn submit_moves_to_thank_you_and_stops() {
        let gateway = TestGateway::new();
        let mut runtime = runtime(two_page_survey());
        runtime.set_answer("q1", true);
        runtime.advance().unwrap();

        runtime.set_answer("q2", false);
        let response_id = runtime.submit(&gateway).await.unwrap();

        assert_eq!(runtime.step_index(), 2);
        assert!(runtime.is_finished());
        assert_eq!(runtime.response_id(), Some(response_id));
        assert_eq!(gateway.calls(), 1);

        assert!(matches!(runtime.submit(&gateway).await, Err(RuntimeError::Finished)));
        assert!(matches!(runtime.advance(), Err(RuntimeError::Finished)));
        assert!(!runtime.back());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn answers_are_frozen_after_submit() {
        let mut runtime = runtime(one_page_survey());
        runtime.set_answer("q1", true);
        runtime.submit(&TestGateway::new()).await.unwrap();

        let q1 = ElementId::new("q1");
        runtime.clear_answer(&q1);
        runtime.set_answer("q1", false);
        runtime.set_personal_info("email", "late@example.org");

        assert_eq!(runtime.answers().get(&q1), Some(&AnswerValue::Bool(true)));
        assert!(runtime.personal_info().is_empty());
    }

    #[tokio::test]
    async fn submit_before_last_page_is_refused() {
        let gateway = TestGateway::new();
        let mut runtime = runtime(two_page_survey());
        runtime.set_answer("q1", true);

        assert!(matches!(
            runtime.submit(&gateway).await,
            Err(RuntimeError::NotOnLastPage)
        ));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_last_page_makes_no_call() {
        let gateway = TestGateway::new();
        let mut runtime = runtime(one_page_survey());

        assert!(matches!(
            runtime.submit(&gateway).await,
            Err(RuntimeError::Validation(_))
        ));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn failed_submit_shows_prefixed_error_and_stays() {
        let gateway = TestGateway::failing("connection reset");
        let mut runtime = runtime(one_page_survey());
        runtime.set_answer("q1", true);

        let err = runtime.submit(&gateway).await.unwrap_err();
        let message = runtime.error_message().unwrap();
        assert!(message.starts_with("Failed to submit survey: "));
        assert!(message.contains("connection reset"));
        assert_eq!(err.to_string(), message);
        assert_eq!(runtime.step(), Step::Page(0));

        // Manual retry is allowed.
        assert!(runtime.submit(&gateway).await.is_err());
        assert_eq!(gateway.calls(), 2);
    }

    #[test]
    fn submission_drops_orphans_static_and_blank_answers() {
        let survey = Survey::new("Mixed", "general").with_pages(vec![
            Page::new("Only")
                .with_element(Element::new(ElementType::Statement).with_id("intro"))
                .with_element(Element::new(ElementType::ShortText).with_id("name"))
                .with_element(Element::new(ElementType::LongText).with_id("notes")),
        ]);
        let mut runtime = runtime(survey).with_metadata("source", "kiosk");
        runtime.set_answer("notes", "   ");
        runtime.set_answer("name", "Robin");
        runtime.set_answer("intro", "ignored");
        runtime.set_answer("deleted-question", "stale");

        let submission = runtime.build_submission();
        assert_eq!(submission.answers.len(), 1);
        assert_eq!(submission.answers[0].question_id.as_str(), "name");
        assert_eq!(submission.metadata["source"], "kiosk");
        assert_eq!(submission.survey_type, "general");
        assert!(submission.personal_info.is_none());
    }

    #[test]
    fn progress_tracks_pages() {
        let mut runtime = runtime(two_page_survey());
        assert_eq!(runtime.progress(), 0.0);
        runtime.set_answer("q1", true);
        runtime.advance().unwrap();
        assert_eq!(runtime.progress(), 0.5);
    }
}
