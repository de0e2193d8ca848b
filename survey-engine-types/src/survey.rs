use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Element, ElementId, PageId, PublicToken, SurveyId, SurveySettings};

/// Publication state of a survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

/// The top-level survey document: metadata, settings and ordered pages.
///
/// A survey is presentation-agnostic. The builder edits it, the public runtime
/// walks it step by step, and the store persists it with its pages inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: SurveyId,

    pub title: String,

    /// Category tag, e.g. `"workshop_feedback"` or `"recovery_intake"`.
    #[serde(rename = "type", default)]
    pub survey_type: String,

    #[serde(default)]
    pub status: SurveyStatus,

    pub public_token: PublicToken,

    #[serde(default)]
    pub settings: SurveySettings,

    #[serde(default)]
    pub pages: Vec<Page>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Survey {
    /// Create a draft survey with a single empty page.
    ///
    /// The id is nil until the survey is stored.
    pub fn new(title: impl Into<String>, survey_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SurveyId::nil(),
            title: title.into(),
            survey_type: survey_type.into(),
            status: SurveyStatus::Draft,
            public_token: PublicToken::generate(),
            settings: SurveySettings::default(),
            pages: vec![Page::new("Page 1")],
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all pages.
    pub fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: SurveySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: SurveyStatus) -> Self {
        self.status = status;
        self
    }

    /// Get the pages.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get a page by position.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get the number of pages.
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Iterate over every element on every page, in page order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.pages.iter().flat_map(|page| page.elements.iter())
    }

    /// Iterate over the elements that collect answers.
    pub fn answerable_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements().filter(|element| !element.is_static())
    }

    /// Find an element anywhere in the survey.
    pub fn find_element(&self, id: &ElementId) -> Option<&Element> {
        self.elements().find(|element| element.id() == id)
    }

    /// Check if an element exists anywhere in the survey.
    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.find_element(id).is_some()
    }

    /// Locate an element as `(page index, position on page)`.
    pub fn locate_element(&self, id: &ElementId) -> Option<(usize, usize)> {
        self.pages.iter().enumerate().find_map(|(page_index, page)| {
            page.position_of(id)
                .map(|position| (page_index, position))
        })
    }

    /// Find a page by id, returning its index.
    pub fn page_index(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|page| &page.id == id)
    }

    /// Check if the survey accepts respondents.
    pub fn is_active(&self) -> bool {
        self.status == SurveyStatus::Active
    }

    /// Check if an anonymous visitor holding `token` may open this survey.
    pub fn is_open_to(&self, token: &str) -> bool {
        self.is_active() && self.public_token.matches(token)
    }
}

/// An ordered group of elements shown together before advancing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Create an empty page with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PageId::generate(),
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Append an element.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Get the elements.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get a mutable reference to the elements.
    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    /// Position of an element on this page.
    pub fn position_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
