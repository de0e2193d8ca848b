//! Core types for the survey-engine crate.
//!
//! This crate provides the foundational types for defining and storing surveys:
//! - `Survey`, `Page` and `SurveySettings` - The survey document
//! - `Element`, `ElementType` and `ElementKind` - Questions, static blocks and their settings
//! - `Answers` and `AnswerValue` - In-progress answers keyed by element id
//! - `Response`, `Answer` and `Submission` - Stored rows and the submit payload
//! - `Repository`, `Record` and `SubmissionGateway` traits - For storage backends

mod ids;
pub use ids::{AnswerId, ElementId, PageId, PublicToken, ResponseId, SurveyId};

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::Answers;

mod element;
pub use element::{
    CheckboxSettings, ChoiceSettings, DateSettings, DropdownSettings, Element, ElementKind,
    ElementType, EmailSettings, ImageSettings, NumberSettings, OpinionScaleSettings,
    RatingScaleSettings, RatingSettings, SectionSettings, StatementSettings, TextBlockSettings,
    TextSettings, UnknownElementType, YesNoSettings,
};

mod settings;
pub use settings::{
    CardShadow, PersonalInfoField, PersonalInfoKind, SurveySettings, ThankYouScreen,
    ThemeSettings, WelcomeScreen,
};

mod survey;
pub use survey::{Page, Survey, SurveyStatus};

mod response;
pub use response::{Answer, AnswerInput, PersonalInfo, RespondentType, Response, Submission};

mod error;
pub use error::{StoreError, SurveyError};

mod traits;
pub use traits::{Record, Repository, SubmissionGateway};
