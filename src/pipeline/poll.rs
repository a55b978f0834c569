// src/pipeline/poll.rs

//! The poll loop.
//!
//! One cycle is Fetch → Parse → Notify → advance cursor. A successful cycle
//! is followed by the long poll interval, a failed one by the short retry
//! interval. Nothing that goes wrong inside a cycle stops the loop; only the
//! shutdown channel does, and it is only observed between cycles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::models::{PollCursor, PollingConfig};
use crate::services::{DeliveryReceipt, HomeworkSource, Notifier, parse_homework_status};

/// What a successful cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response carried no homework
    NoUpdate,
    /// The newest homework was reported
    Notified { receipt: DeliveryReceipt },
}

/// Polling state machine with its collaborators.
pub struct PollLoop {
    source: Arc<dyn HomeworkSource>,
    notifier: Notifier,
    cursor: PollCursor,
    interval: Duration,
    retry_interval: Duration,
}

impl PollLoop {
    pub fn new(
        source: Arc<dyn HomeworkSource>,
        notifier: Notifier,
        cursor: PollCursor,
        polling: &PollingConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            cursor,
            interval: polling.interval(),
            retry_interval: polling.retry(),
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Run a single cycle.
    ///
    /// The cursor only moves when every step before it succeeded, so a failed
    /// cycle is retried from the same point.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        log::debug!("Polling for updates since {}", self.cursor.value());
        let response = self.source.fetch(self.cursor.value()).await?;

        let outcome = match response.newest() {
            Some(record) => {
                let message = parse_homework_status(&record)?;
                let receipt = self.notifier.send(&message).await?;
                CycleOutcome::Notified { receipt }
            }
            None => {
                log::debug!("No homework updates");
                CycleOutcome::NoUpdate
            }
        };

        if self.cursor.advance(response.current_date) {
            log::debug!("Cursor advanced to {}", self.cursor.value());
        }
        Ok(outcome)
    }

    /// Poll until `shutdown` carries `true`.
    ///
    /// A cycle in progress always runs to completion; the signal is acted on
    /// at the next sleep or before the next fetch.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        log::info!(
            "Polling every {}s (retry after {}s), starting from {}",
            self.interval.as_secs(),
            self.retry_interval.as_secs(),
            self.cursor.value()
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let pause = match self.run_cycle().await {
                Ok(_) => self.interval,
                Err(error) => {
                    self.report_failure(&error);
                    self.retry_interval
                }
            };

            if sleep_or_shutdown(pause, &mut shutdown).await {
                break;
            }
        }

        log::info!(
            "Poll loop stopped at cursor {} after {} message(s)",
            self.cursor.value(),
            self.notifier.sent_count()
        );
    }

    fn report_failure(&self, error: &AppError) {
        log::error!("Cycle failed [{}]: {}", error.kind(), error);

        let mut cause = std::error::Error::source(error);
        while let Some(inner) = cause {
            log::debug!("  caused by: {}", inner);
            cause = inner.source();
        }

        log::info!(
            "Retrying in {}s from cursor {}",
            self.retry_interval.as_secs(),
            self.cursor.value()
        );
    }
}

/// Sleep for `duration`, returning early with `true` if shutdown is signalled.
///
/// If every sender is gone the sleep simply runs out.
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return false,
            changed = shutdown.changed() => match changed {
                Ok(()) if *shutdown.borrow_and_update() => return true,
                Ok(()) => {}
                Err(_) => {
                    (&mut sleep).await;
                    return false;
                }
            },
        }
    }
}
