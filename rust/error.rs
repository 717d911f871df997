use thiserror::Error;

/// Startup failure: one or more required environment variables are unset.
#[derive(Debug, Error)]
#[error("Учетные данные не были предоставлены: {}", .missing.join(", "))]
pub struct ConfigError {
    pub missing: Vec<&'static str>,
}

/// Everything that can go wrong within one polling iteration.
///
/// The `Display` text is what the chat receives, so it stays in Russian.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Ошибка получения ответа при обращении к {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Неверный код статуса: {0}")]
    HttpStatus(u16),

    #[error("Получен код 200, но JSON не может быть обработан: {0}")]
    ResponseFormat(#[source] serde_json::Error),

    #[error("API вернул ошибку: {0}")]
    Api(String),

    #[error("Некорректный ответ от API! Ответ не является словарем")]
    NotAnObject,

    #[error("Ответ не содержит значение \"{0}\"")]
    MissingField(&'static str),

    #[error("Некорректный ответ от API! Значение \"homeworks\" не является списком!")]
    HomeworksNotList,

    #[error("Некорректный ответ от API! Значение \"current_date\" не является целым числом!")]
    CurrentDateNotInteger,

    #[error("Ошибка получения данных {field}: {value}")]
    InvalidRecord { field: &'static str, value: String },
}

/// Coarse category of a poll failure, attached to the error log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Api,
    Type,
    Value,
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::Transport { .. } | PollError::HttpStatus(_) | PollError::ResponseFormat(_) => {
                ErrorKind::Transport
            }
            PollError::Api(_) => ErrorKind::Api,
            PollError::MissingField(_) => ErrorKind::Value,
            PollError::NotAnObject
            | PollError::HomeworksNotList
            | PollError::CurrentDateNotInteger
            | PollError::InvalidRecord { .. } => ErrorKind::Type,
        }
    }
}
