use std::time::Duration;

use tokio::time;

use crate::error::PollError;
use crate::homework::{check_response, parse_status};
use crate::practicum::StatusSource;
use crate::telegram::{send_message, Notifier};

pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Loop-local state carried between iterations.
#[derive(Debug)]
pub struct PollState {
    /// Unix seconds passed as `from_date` on the next request.
    pub timestamp: i64,
    /// Last error text reported to the chat.
    pub last_error: String,
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    state: PollState,
}

impl<S: StatusSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, timestamp: i64) -> Self {
        Self {
            source,
            notifier,
            state: PollState {
                timestamp,
                last_error: String::new(),
            },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Polls forever, sleeping `RETRY_PERIOD` after every iteration whatever
    /// its outcome.
    pub async fn run(mut self) {
        loop {
            self.tick().await;
            tracing::debug!(
                from_date = self.state().timestamp,
                wait_secs = RETRY_PERIOD.as_secs(),
                "Waiting for next poll"
            );
            time::sleep(RETRY_PERIOD).await;
        }
    }

    /// One iteration. Errors never escape: they are logged and, when the
    /// text changed since the previous failure, sent to the chat.
    pub async fn tick(&mut self) {
        if let Err(err) = self.poll_once().await {
            self.report(err).await;
        }
    }

    async fn poll_once(&mut self) -> Result<(), PollError> {
        let response = self
            .source
            .homework_statuses(self.state.timestamp)
            .await?;

        // The window only moves once the reply has a usable shape; a malformed
        // reply is retried from the same timestamp.
        let batch = check_response(&response)?;
        self.state.timestamp = batch.current_date;

        match batch.homeworks.first() {
            None => tracing::debug!(timestamp = self.state.timestamp, "No new statuses in response"),
            Some(homework) => {
                let message = parse_status(homework)?;
                send_message(&self.notifier, &message).await;
            }
        }

        Ok(())
    }

    async fn report(&mut self, err: PollError) {
        let message = format!("Сбой в работе программы: {err}");
        tracing::error!(kind = ?err.kind(), "{}", message);

        if message != self.state.last_error {
            send_message(&self.notifier, &message).await;
        }
        self.state.last_error = message;
    }
}
