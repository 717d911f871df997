use std::env;

use crate::error::ConfigError;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Checks all three variables before failing, so the error (and the log)
    /// names every one that is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| {
            let value = lookup(name).filter(|value| !value.trim().is_empty());
            if value.is_none() {
                tracing::error!(severity = "critical", variable = name, "Переменная {} не задана.", name);
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError { missing });
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Writer handing every formatted log line to a shared buffer.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn missing_names(result: Result<Credentials, ConfigError>) -> Vec<&'static str> {
        match result {
            Ok(_) => panic!("expected missing credentials"),
            Err(err) => err.missing,
        }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, "t"),
            (TELEGRAM_CHAT_ID, "42"),
        ]))
        .unwrap();
        assert_eq!(creds.practicum_token, "p");
        assert_eq!(creds.telegram_token, "t");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn reports_every_missing_variable() {
        let missing = missing_names(Credentials::from_lookup(lookup_from(&[(TELEGRAM_TOKEN, "t")])));
        assert_eq!(missing, vec![PRACTICUM_TOKEN, TELEGRAM_CHAT_ID]);

        let missing = missing_names(Credentials::from_lookup(lookup_from(&[])));
        assert_eq!(missing, vec![PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID]);
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let missing = missing_names(Credentials::from_lookup(lookup_from(&[
            (PRACTICUM_TOKEN, "p"),
            (TELEGRAM_TOKEN, "  "),
            (TELEGRAM_CHAT_ID, "42"),
        ])));
        assert_eq!(missing, vec![TELEGRAM_TOKEN]);
    }

    #[test]
    fn each_missing_variable_is_logged_as_critical() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            Credentials::from_lookup(lookup_from(&[(TELEGRAM_TOKEN, "t")]))
        });
        assert_eq!(missing_names(result), vec![PRACTICUM_TOKEN, TELEGRAM_CHAT_ID]);

        let lines = logs.lines();
        for name in [PRACTICUM_TOKEN, TELEGRAM_CHAT_ID] {
            let text = format!("Переменная {name} не задана.");
            let matching: Vec<&String> = lines.iter().filter(|line| line.contains(&text)).collect();
            assert_eq!(matching.len(), 1, "expected one log line for {name}: {lines:?}");
            assert!(matching[0].contains("ERROR"));
            assert!(matching[0].contains("severity=\"critical\""));
        }
        assert!(!lines.iter().any(|line| line.contains(TELEGRAM_TOKEN)));
    }
}
