use std::sync::Arc;
use std::time::Duration;

use qimen::{
    chart_to_prompt, generate_chart_with, Chart, ChartOptions, Clock, CompletionError, Points,
    PointsLedger, QimenError, RetryPolicy, TextCompleter, UserId,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::ReadingKind;

/// Cap on exponential back-off growth between completion attempts.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Reading behaviour, read from the `[readings]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingSettings {
    /// Points charged per reading. Zero leaves the ledger untouched.
    pub cost: Points,
    /// Completion attempts per reading, including the first.
    pub max_attempts: u32,
    /// Base delay before a retry when the provider names none.
    pub retry_backoff_ms: u64,
    /// Longest wait between attempts, whatever the provider asks for.
    pub max_retry_delay_ms: u64,
    /// Fly the eight deities onto the chart.
    pub include_deities: bool,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            cost: Points::new(0),
            max_attempts: 2,
            retry_backoff_ms: 250,
            max_retry_delay_ms: 30_000,
            include_deities: false,
        }
    }
}

/// Everything a finished reading produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingOutcome {
    pub chart: Chart,
    pub prompt: String,
    pub answer: String,
    /// Balance after the charge; `None` when the reading was free.
    pub points_remaining: Option<Points>,
}

/// Runs readings against injected ports.
pub struct ReadingService {
    clock: Arc<dyn Clock>,
    ledger: Arc<dyn PointsLedger>,
    completer: Arc<dyn TextCompleter>,
    settings: ReadingSettings,
}

impl ReadingService {
    pub fn new(
        clock: Arc<dyn Clock>,
        ledger: Arc<dyn PointsLedger>,
        completer: Arc<dyn TextCompleter>,
        settings: ReadingSettings,
    ) -> Self {
        Self {
            clock,
            ledger,
            completer,
            settings,
        }
    }

    pub fn settings(&self) -> &ReadingSettings {
        &self.settings
    }

    /// Charts, charges and completes one reading for `user`.
    ///
    /// A blank question fails before anything is charged. If the completer
    /// ultimately fails, the charge is refunded and the completion error is
    /// returned.
    #[instrument(skip_all, fields(user = %user, kind = kind.label()))]
    pub async fn perform(
        &self,
        user: &UserId,
        kind: &ReadingKind,
    ) -> Result<ReadingOutcome, QimenError> {
        let question = kind.question();
        if question.trim().is_empty() {
            return Err(QimenError::EmptyQuestion);
        }

        let instant = kind.fixed_instant().unwrap_or_else(|| self.clock.now());
        let chart = generate_chart_with(
            instant,
            ChartOptions {
                include_deities: self.settings.include_deities,
            },
        );
        let prompt = chart_to_prompt(&chart, &question, kind.context().as_deref());

        let cost = self.settings.cost;
        let points_remaining = if cost.is_zero() {
            None
        } else {
            Some(self.ledger.debit(user, cost)?)
        };

        match self.complete_with_retry(&prompt).await {
            Ok(answer) => {
                info!(
                    %instant,
                    board = %chart.board_type(),
                    ju = chart.ju().get(),
                    "reading completed"
                );
                Ok(ReadingOutcome {
                    chart,
                    prompt,
                    answer,
                    points_remaining,
                })
            }
            Err(err) => {
                if points_remaining.is_some() {
                    self.refund(user, cost);
                }
                Err(err.into())
            }
        }
    }

    fn refund(&self, user: &UserId, cost: Points) {
        match self.ledger.credit(user, cost) {
            Ok(balance) => info!(%cost, %balance, "reading charge refunded"),
            Err(e) => error!(%cost, error = %e, "failed to refund reading charge"),
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        Duration::from_millis(self.settings.retry_backoff_ms.saturating_mul(1 << shift))
    }

    /// Delay before the next attempt. A provider's `Retry-After` wins over
    /// back-off but never exceeds `max_retry_delay_ms`.
    fn retry_delay(&self, attempt: u32, after: Option<Duration>) -> Duration {
        let ceiling = Duration::from_millis(self.settings.max_retry_delay_ms);
        after.unwrap_or_else(|| self.backoff(attempt)).min(ceiling)
    }

    async fn complete_with_retry(&self, prompt: &str) -> Result<String, CompletionError> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let err = match self.completer.complete(prompt).await {
                Ok(answer) => return Ok(answer),
                Err(err) => err,
            };
            match err.retry_policy() {
                RetryPolicy::Retryable { after } if attempt < max_attempts => {
                    let delay = self.retry_delay(attempt, after);
                    warn!(attempt, max_attempts, ?delay, error = %err, "completion failed; retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => {
                    warn!(attempt, error = %err, "completion failed");
                    return Err(err);
                }
            }
        }
    }
}
