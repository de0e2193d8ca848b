//! # survey-engine
//!
//! Multi-page survey definitions, validation, theming and submission.
//! Storage-agnostic.
//!
//! The same survey document is shared by the authoring builder, the public
//! respondent runtime and the storage layer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_engine::{
//!     Element, ElementType, EngineConfig, Page, RespondentType, Survey, SurveyRuntime,
//! };
//!
//! let survey = Survey::new("Check-in", "general").with_pages(vec![
//!     Page::new("Only page").with_element(
//!         Element::new(ElementType::YesNo)
//!             .with_id("attending")
//!             .with_label("Will you attend?")
//!             .with_required(true),
//!     ),
//! ]);
//!
//! let config = EngineConfig::default();
//! let mut runtime = SurveyRuntime::new(survey, RespondentType::External, &config)?;
//! runtime.set_answer("attending", true);
//! runtime.submit(&gateway).await?;
//! assert!(runtime.is_finished());
//! ```
//!
//! ## Modules
//!
//! - `validation` - Per-page rules deciding whether a respondent may advance
//! - `theme` - Derives the full token set from six author-picked colors
//! - `runtime` - The welcome / personal info / pages / thank-you state machine
//! - `gateway` - Standard and elevated server-side submission writers
//! - `builder` - Authoring edits with undo/redo
//! - `store` - In-memory `Repository` implementation
//! - `sync` - Optimistic collections that reload on failure
//! - `public` - Loading a survey from its public token
//! - `report` - Per-question result summaries
//! - `config` - `EngineConfig`, loadable from `SURVEY_ENGINE_*` variables

// Re-export all types from survey-engine-types
pub use survey_engine_types::*;

pub mod builder;
pub use builder::{EditError, EditHistory, SurveyEdit};

pub mod config;
pub use config::EngineConfig;

pub mod gateway;
pub use gateway::{ElevatedGateway, StandardGateway, SubmissionRouter, SurveyTables};

pub mod public;
pub use public::{load_public_survey, load_public_survey_by_id};

pub mod report;
pub use report::{SurveyReport, build_report, load_report, pair_responses};

pub mod runtime;
pub use runtime::{RuntimeError, Step, SurveyRuntime};

pub mod store;
pub use store::MemoryRepository;

pub mod sync;
pub use sync::OptimisticCollection;

pub mod theme;
pub use theme::{ThemeTokens, build_theme, build_theme_from_settings};

pub mod validation;
pub use validation::{ValidationError, validate_page, validate_personal_info};

// Test gateway for exercising submissions without storage
mod test_gateway;
pub use test_gateway::TestGateway;
