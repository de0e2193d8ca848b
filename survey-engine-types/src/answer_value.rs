use serde::{Deserialize, Serialize};

/// A single answer value collected for an element.
///
/// This is the value stored in `Answers` while a respondent fills in a survey,
/// and the `value` column of a stored `Answer`. On the wire it is a bare JSON
/// string, boolean, number or array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A boolean value (from yes/no elements).
    Bool(bool),

    /// A numeric value (from number, rating and scale elements).
    Number(f64),

    /// A string value (text inputs, dates, single choices).
    Text(String),

    /// Selected options (from checkboxes and multi-select dropdowns).
    List(Vec<String>),
}

impl AnswerValue {
    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a number, parsing numeric text.
    ///
    /// Number inputs arrive as text from most front ends.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a list of selected options.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Number of options this value selects.
    ///
    /// A non-blank single string counts as one selection.
    pub fn selection_count(&self) -> usize {
        match self {
            Self::List(items) => items.iter().filter(|s| !s.trim().is_empty()).count(),
            Self::Text(s) if !s.trim().is_empty() => 1,
            _ => 0,
        }
    }

    /// Check if the value carries no information (blank text or empty list).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.iter().all(|s| s.trim().is_empty()),
            Self::Bool(_) => false,
            Self::Number(n) => !n.is_finite(),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for AnswerValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
