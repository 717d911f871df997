use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

/// Review state of a homework submission as reported by Practicum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// A status batch that passed shape validation.
///
/// Records stay untyped: only the newest one is ever inspected, and its
/// fields are checked separately by `homework::parse_status`.
#[derive(Debug)]
pub struct StatusResponse {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Error body the API sends with a 200 when something went wrong server side.
///
/// Both fields are kept untyped: `error` is sometimes a nested object, and a
/// body of an unexpected shape must still be recognised by its `code`.
#[derive(Debug, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub error: Value,
}

impl ApiFailure {
    pub fn is_fatal_code(&self) -> bool {
        matches!(self.code.as_str(), Some("UnknownError" | "Not_authenticated"))
    }

    /// Server-supplied error text: strings as is, other values as compact
    /// JSON, nothing when absent.
    pub fn error_text(&self) -> String {
        match &self.error {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
