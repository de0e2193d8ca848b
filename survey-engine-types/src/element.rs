use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::ElementId;

/// The closed set of element types a survey page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    ShortText,
    LongText,
    Email,
    Number,
    Date,
    MultipleChoice,
    Checkboxes,
    Dropdown,
    Rating,
    OpinionScale,
    YesNo,
    RatingScale,
    Section,
    TextBlock,
    Image,
    Statement,
}

impl ElementType {
    /// Every element type, in palette order.
    pub const ALL: [ElementType; 16] = [
        Self::ShortText,
        Self::LongText,
        Self::Email,
        Self::Number,
        Self::Date,
        Self::MultipleChoice,
        Self::Checkboxes,
        Self::Dropdown,
        Self::Rating,
        Self::OpinionScale,
        Self::YesNo,
        Self::RatingScale,
        Self::Section,
        Self::TextBlock,
        Self::Image,
        Self::Statement,
    ];

    /// The wire name of this type (`"short_text"`, `"yes_no"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::MultipleChoice => "multiple_choice",
            Self::Checkboxes => "checkboxes",
            Self::Dropdown => "dropdown",
            Self::Rating => "rating",
            Self::OpinionScale => "opinion_scale",
            Self::YesNo => "yes_no",
            Self::RatingScale => "rating_scale",
            Self::Section => "section",
            Self::TextBlock => "text_block",
            Self::Image => "image",
            Self::Statement => "statement",
        }
    }

    /// Label given to freshly created elements of this type.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::ShortText => "Short answer",
            Self::LongText => "Long answer",
            Self::Email => "Email address",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::MultipleChoice => "Multiple choice",
            Self::Checkboxes => "Checkboxes",
            Self::Dropdown => "Dropdown",
            Self::Rating => "Rating",
            Self::OpinionScale => "Opinion scale",
            Self::YesNo => "Yes or no",
            Self::RatingScale => "Rating scale",
            Self::Section => "Section",
            Self::TextBlock => "Text",
            Self::Image => "Image",
            Self::Statement => "Statement",
        }
    }

    /// Static elements display content and never collect an answer.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            Self::Section | Self::TextBlock | Self::Image | Self::Statement
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown element type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown element type: {0}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

/// A single element (question or static block) on a survey page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ElementRepr")]
pub struct Element {
    /// Unique id, referenced by stored answers.
    id: ElementId,

    /// The label (question title) shown to the respondent.
    label: String,

    /// Optional hint shown under the label.
    description: String,

    /// Whether the respondent must answer before advancing.
    required: bool,

    /// The type together with its type-specific settings.
    kind: ElementKind,
}

impl Element {
    /// Create an element of the given type with default settings and a fresh id.
    pub fn new(element_type: ElementType) -> Self {
        Self::with_kind(ElementKind::default_for(element_type))
    }

    /// Create an element from explicit settings with a fresh id.
    pub fn with_kind(kind: ElementKind) -> Self {
        Self {
            id: ElementId::generate(),
            label: kind.element_type().default_label().to_string(),
            description: String::new(),
            required: false,
            kind,
        }
    }

    /// Replace the id.
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replace the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Get the element id.
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label to use in messages, falling back when the label is blank.
    pub fn display_label(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            "This question"
        } else {
            label
        }
    }

    /// Get the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check the required flag.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the element kind.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Get a mutable reference to the element kind.
    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Get the element type.
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Check if this is a static block (never answered).
    pub fn is_static(&self) -> bool {
        self.element_type().is_static()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Give this element a fresh id (used when duplicating).
    pub fn regenerate_id(&mut self) {
        self.id = ElementId::generate();
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Element", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.element_type())?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("required", &self.required)?;
        state.serialize_field("settings", &self.kind)?;
        state.end()
    }
}

/// Stored shape of an element: flat fields plus an untyped settings object.
#[derive(Deserialize)]
struct ElementRepr {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(default, alias = "title")]
    label: String,
    #[serde(default, alias = "hint")]
    description: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    settings: serde_json::Value,
}

impl TryFrom<ElementRepr> for Element {
    type Error = serde_json::Error;

    fn try_from(repr: ElementRepr) -> Result<Self, Self::Error> {
        let kind = ElementKind::from_settings(repr.element_type, repr.settings)?;
        Ok(Self {
            id: repr.id,
            label: repr.label,
            description: repr.description,
            required: repr.required,
            kind,
        })
    }
}

/// The element type together with the settings valid for it.
///
/// Serializes as the bare settings object; the type tag lives on `Element`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementKind {
    ShortText(TextSettings),
    LongText(TextSettings),
    Email(EmailSettings),
    Number(NumberSettings),
    Date(DateSettings),
    MultipleChoice(ChoiceSettings),
    Checkboxes(CheckboxSettings),
    Dropdown(DropdownSettings),
    Rating(RatingSettings),
    OpinionScale(OpinionScaleSettings),
    YesNo(YesNoSettings),
    RatingScale(RatingScaleSettings),
    Section(SectionSettings),
    TextBlock(TextBlockSettings),
    Image(ImageSettings),
    Statement(StatementSettings),
}

impl ElementKind {
    /// Default settings for a type.
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::ShortText => Self::ShortText(TextSettings::default()),
            ElementType::LongText => Self::LongText(TextSettings::default()),
            ElementType::Email => Self::Email(EmailSettings::default()),
            ElementType::Number => Self::Number(NumberSettings::default()),
            ElementType::Date => Self::Date(DateSettings::default()),
            ElementType::MultipleChoice => Self::MultipleChoice(ChoiceSettings::default()),
            ElementType::Checkboxes => Self::Checkboxes(CheckboxSettings::default()),
            ElementType::Dropdown => Self::Dropdown(DropdownSettings::default()),
            ElementType::Rating => Self::Rating(RatingSettings::default()),
            ElementType::OpinionScale => Self::OpinionScale(OpinionScaleSettings::default()),
            ElementType::YesNo => Self::YesNo(YesNoSettings::default()),
            ElementType::RatingScale => Self::RatingScale(RatingScaleSettings::default()),
            ElementType::Section => Self::Section(SectionSettings::default()),
            ElementType::TextBlock => Self::TextBlock(TextBlockSettings::default()),
            ElementType::Image => Self::Image(ImageSettings::default()),
            ElementType::Statement => Self::Statement(StatementSettings::default()),
        }
    }

    /// Parse the settings object stored for an element of the given type.
    ///
    /// Missing keys take their defaults; `null` is treated as `{}`.
    pub fn from_settings(
        element_type: ElementType,
        settings: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        use serde_json::from_value;

        let settings = if settings.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            settings
        };

        Ok(match element_type {
            ElementType::ShortText => Self::ShortText(from_value(settings)?),
            ElementType::LongText => Self::LongText(from_value(settings)?),
            ElementType::Email => Self::Email(from_value(settings)?),
            ElementType::Number => Self::Number(from_value(settings)?),
            ElementType::Date => Self::Date(from_value(settings)?),
            ElementType::MultipleChoice => Self::MultipleChoice(from_value(settings)?),
            ElementType::Checkboxes => Self::Checkboxes(from_value(settings)?),
            ElementType::Dropdown => Self::Dropdown(from_value(settings)?),
            ElementType::Rating => Self::Rating(from_value(settings)?),
            ElementType::OpinionScale => Self::OpinionScale(from_value(settings)?),
            ElementType::YesNo => Self::YesNo(from_value(settings)?),
            ElementType::RatingScale => Self::RatingScale(from_value(settings)?),
            ElementType::Section => Self::Section(from_value(settings)?),
            ElementType::TextBlock => Self::TextBlock(from_value(settings)?),
            ElementType::Image => Self::Image(from_value(settings)?),
            ElementType::Statement => Self::Statement(from_value(settings)?),
        })
    }

    /// The type tag of this kind.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::ShortText(_) => ElementType::ShortText,
            Self::LongText(_) => ElementType::LongText,
            Self::Email(_) => ElementType::Email,
            Self::Number(_) => ElementType::Number,
            Self::Date(_) => ElementType::Date,
            Self::MultipleChoice(_) => ElementType::MultipleChoice,
            Self::Checkboxes(_) => ElementType::Checkboxes,
            Self::Dropdown(_) => ElementType::Dropdown,
            Self::Rating(_) => ElementType::Rating,
            Self::OpinionScale(_) => ElementType::OpinionScale,
            Self::YesNo(_) => ElementType::YesNo,
            Self::RatingScale(_) => ElementType::RatingScale,
            Self::Section(_) => ElementType::Section,
            Self::TextBlock(_) => ElementType::TextBlock,
            Self::Image(_) => ElementType::Image,
            Self::Statement(_) => ElementType::Statement,
        }
    }

    /// The selectable options, for choice-based kinds.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice(s) => Some(&s.choices),
            Self::Checkboxes(s) => Some(&s.choices),
            Self::Dropdown(s) => Some(&s.choices),
            _ => None,
        }
    }

    /// Mutable access to the options, for choice-based kinds.
    pub fn choices_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::MultipleChoice(s) => Some(&mut s.choices),
            Self::Checkboxes(s) => Some(&mut s.choices),
            Self::Dropdown(s) => Some(&mut s.choices),
            _ => None,
        }
    }

    /// Check if this kind collects several options at once.
    pub fn is_multi_select(&self) -> bool {
        match self {
            Self::Checkboxes(_) => true,
            Self::Dropdown(s) => s.multi_select,
            _ => false,
        }
    }
}

fn default_choices() -> Vec<String> {
    (1..=3).map(|i| format!("Option {i}")).collect()
}

/// Settings for short and long text inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSettings {
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Settings for an email input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailSettings {
    pub placeholder: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            placeholder: "name@example.com".to_string(),
        }
    }
}

/// Settings for a number input with optional inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberSettings {
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberSettings {
    /// Create with bounds.
    pub fn with_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            placeholder: String::new(),
            min,
            max,
        }
    }
}

/// Settings for a date input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<NaiveDate>,
}

/// Settings for a single-choice (radio) question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChoiceSettings {
    pub choices: Vec<String>,
    pub allow_other: bool,
}

impl Default for ChoiceSettings {
    fn default() -> Self {
        Self {
            choices: default_choices(),
            allow_other: false,
        }
    }
}

/// Settings for a checkbox (select any) question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxSettings {
    pub choices: Vec<String>,
    pub allow_other: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
}

impl Default for CheckboxSettings {
    fn default() -> Self {
        Self {
            choices: default_choices(),
            allow_other: false,
            min_selections: None,
            max_selections: None,
        }
    }
}

/// Settings for a dropdown, single or multi-select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropdownSettings {
    pub choices: Vec<String>,
    pub placeholder: String,
    pub multi_select: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_selections: Option<u32>,
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            choices: default_choices(),
            placeholder: "Select an option".to_string(),
            multi_select: false,
            min_selections: None,
        }
    }
}

/// Settings for a star rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatingSettings {
    pub max_rating: u8,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self { max_rating: 5 }
    }
}

/// Settings for an opinion scale (0 to 10 by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpinionScaleSettings {
    pub min: i32,
    pub max: i32,
    pub min_label: String,
    pub max_label: String,
}

impl Default for OpinionScaleSettings {
    fn default() -> Self {
        Self {
            min: 0,
            max: 10,
            min_label: String::new(),
            max_label: String::new(),
        }
    }
}

impl OpinionScaleSettings {
    /// The selectable points, empty when the bounds are inverted.
    pub fn range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

/// Settings for a yes/no question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YesNoSettings {
    pub yes_label: String,
    pub no_label: String,
}

impl Default for YesNoSettings {
    fn default() -> Self {
        Self {
            yes_label: "Yes".to_string(),
            no_label: "No".to_string(),
        }
    }
}

/// Settings for a labeled rating scale (1 to 10 by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatingScaleSettings {
    pub min: i32,
    pub max: i32,
    pub min_label: String,
    pub max_label: String,
}

impl Default for RatingScaleSettings {
    fn default() -> Self {
        Self {
            min: 1,
            max: 10,
            min_label: "Not likely".to_string(),
            max_label: "Very likely".to_string(),
        }
    }
}

impl RatingScaleSettings {
    pub fn range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

/// A section header; the label and description are its content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSettings {}

/// A block of explanatory text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlockSettings {
    pub content: String,
    /// Content is trusted markup rather than plain text.
    pub rich_content: bool,
}

/// An image block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub alt_text: String,
    pub caption: String,
}

/// A full-width statement with a continue button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatementSettings {
    pub content: String,
    pub button_text: String,
}

impl Default for StatementSettings {
    fn default() -> Self {
        Self {
            content: String::new(),
            button_text: "Continue".to_string(),
        }
    }
}
