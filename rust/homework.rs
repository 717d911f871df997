use serde_json::Value;

use crate::error::PollError;
use crate::models::{HomeworkStatus, StatusResponse};

/// Checks the reply shape and returns the typed batch.
///
/// Checks run in a fixed order and the first failure wins: object, then
/// presence of `homeworks` and `current_date`, then their types. A `null`
/// field counts as absent.
pub fn check_response(response: &Value) -> Result<StatusResponse, PollError> {
    let object = response.as_object().ok_or(PollError::NotAnObject)?;

    let homeworks = object
        .get("homeworks")
        .filter(|value| !value.is_null())
        .ok_or(PollError::MissingField("homeworks"))?;
    let current_date = object
        .get("current_date")
        .filter(|value| !value.is_null())
        .ok_or(PollError::MissingField("current_date"))?;

    let homeworks = homeworks.as_array().ok_or(PollError::HomeworksNotList)?;
    let current_date = current_date.as_i64().ok_or(PollError::CurrentDateNotInteger)?;

    Ok(StatusResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

/// Builds the notification text for one homework record.
pub fn parse_status(homework: &Value) -> Result<String, PollError> {
    let record = homework.as_object().ok_or(PollError::NotAnObject)?;

    let raw_status = record.get("status");
    let status = raw_status
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<HomeworkStatus>().ok())
        .ok_or_else(|| PollError::InvalidRecord {
            field: "status",
            value: describe(raw_status),
        })?;

    let raw_name = record.get("homework_name");
    let homework_name = raw_name
        .and_then(Value::as_str)
        .ok_or_else(|| PollError::InvalidRecord {
            field: "homework_name",
            value: describe(raw_name),
        })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework_name,
        status.verdict()
    ))
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
