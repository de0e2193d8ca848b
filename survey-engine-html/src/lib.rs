//! HTML renderer for survey-engine.
//!
//! Renders the current step of a [`SurveyRuntime`](survey_engine::SurveyRuntime)
//! as a themed HTML form, or a whole survey as an authoring preview.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_engine::{EngineConfig, RespondentType, SurveyRuntime};
//! use survey_engine_html::{HtmlOptions, render_step};
//!
//! let runtime = SurveyRuntime::new(survey, RespondentType::External, &EngineConfig::default())?;
//! let html = render_step(&runtime, &HtmlOptions::new().with_title("Feedback"));
//! std::fs::write("step.html", html)?;
//! ```

mod generator;

pub use generator::{
    HtmlOptions, MAX_SCALE_POINTS, escape_html, render_element, render_step, render_survey,
    theme_css,
};
