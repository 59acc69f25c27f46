//! Email delivery: outbox worker and sender abstractions.
//!
//! Auth flows never call the email provider inline — they enqueue
//! `outbox_events` rows in the same transaction as the token they refer to.
//! A background task polls due rows, renders them into messages and hands
//! each to an [`EmailSender`]. Failures retry with exponential backoff and
//! jitter until `max_attempts`, then the row parks as failed. The unique
//! idempotency key on the table keeps re-enqueued events from double-sending.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use chrono::Utc;
use rand::RngExt;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use tokio::time::sleep;
use tracing::{error, info};

use tats_auth_schema::outbox_events;

/// A rendered message ready for delivery.
#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the outbox worker.
///
/// Declared `-> impl Future + Send` rather than `async fn`: the worker task
/// is spawned generically over the sender, so its future must be provably
/// Send. Implementations still write plain `async fn`.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to schedule a retry.
    fn send(&self, message: &EmailMessage) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(to = %message.to, subject = %message.subject, "email send stub");
        Ok(())
    }
}

/// Sender backed by the transactional email HTTP API.
#[derive(Clone)]
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": message.to,
                "subject": message.subject,
                "text": message.body,
            }))
            .send()
            .await
            .context("email API request")?;

        let status = response.status();
        if !status.is_success() {
            bail!("email API returned {status}");
        }
        Ok(())
    }
}

/// Worker cadence and retry policy.
#[derive(Clone, Copy, Debug)]
pub struct EmailWorkerConfig {
    pub poll_interval: Duration,
    pub batch_size: u64,
    pub max_attempts: i32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for EmailWorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            batch_size: 10,
            max_attempts: 5,
            backoff_base: Duration::from_secs(5),
            backoff_max: Duration::from_secs(300),
        }
    }
}

/// Render an outbox event into a deliverable message.
///
/// Link targets are dashboard routes; the dashboard pages pass the token back
/// to the consume endpoints.
pub fn render_event(
    kind: &str,
    payload: &serde_json::Value,
    app_base_url: &str,
) -> Result<EmailMessage> {
    let to = payload["email"]
        .as_str()
        .context("outbox payload missing email")?
        .to_owned();

    match kind {
        "verification_requested" => {
            let token = payload["token"]
                .as_str()
                .context("outbox payload missing token")?;
            Ok(EmailMessage {
                to,
                subject: "Confirm your email".to_owned(),
                body: format!(
                    "Click {app_base_url}/auth/new-verification?token={token} to confirm your email."
                ),
            })
        }
        "password_reset_requested" => {
            let token = payload["token"]
                .as_str()
                .context("outbox payload missing token")?;
            Ok(EmailMessage {
                to,
                subject: "Reset your password".to_owned(),
                body: format!(
                    "Click {app_base_url}/auth/new-password?token={token} to choose a new password."
                ),
            })
        }
        "password_changed" => Ok(EmailMessage {
            to,
            subject: "Your password was changed".to_owned(),
            body: "The password for your Tats account was just changed. If this wasn't you, \
                   reset it immediately."
                .to_owned(),
        }),
        other => bail!("unknown outbox event kind: {other}"),
    }
}

/// Spawn the background task that polls and drains the outbox.
pub fn spawn_outbox_worker<S>(
    db: DatabaseConnection,
    sender: Arc<S>,
    app_base_url: String,
    config: EmailWorkerConfig,
) -> tokio::task::JoinHandle<()>
where
    S: EmailSender + 'static,
{
    tokio::spawn(async move {
        loop {
            if let Err(err) = process_due_events(&db, sender.as_ref(), &app_base_url, &config).await
            {
                error!(error = %err, "outbox batch failed");
            }
            sleep(config.poll_interval).await;
        }
    })
}

async fn process_due_events<S: EmailSender>(
    db: &DatabaseConnection,
    sender: &S,
    app_base_url: &str,
    config: &EmailWorkerConfig,
) -> Result<usize> {
    let now = Utc::now();
    let due = outbox_events::Entity::find()
        .filter(outbox_events::Column::ProcessedAt.is_null())
        .filter(outbox_events::Column::FailedAt.is_null())
        .filter(outbox_events::Column::NextAttemptAt.lte(now))
        .order_by_asc(outbox_events::Column::NextAttemptAt)
        .limit(config.batch_size)
        .all(db)
        .await
        .context("load due outbox events")?;

    let count = due.len();
    for event in due {
        let outcome = match render_event(&event.kind, &event.payload, app_base_url) {
            Ok(message) => sender.send(&message).await,
            Err(err) => Err(err),
        };
        record_attempt(db, event, outcome, config).await?;
    }
    Ok(count)
}

async fn record_attempt(
    db: &DatabaseConnection,
    event: outbox_events::Model,
    outcome: Result<()>,
    config: &EmailWorkerConfig,
) -> Result<()> {
    let now = Utc::now();
    let attempts = event.attempts.saturating_add(1);
    let mut am = outbox_events::ActiveModel {
        id: Set(event.id),
        attempts: Set(attempts),
        ..Default::default()
    };

    match outcome {
        Ok(()) => {
            am.last_error = Set(None);
            am.processed_at = Set(Some(now));
        }
        Err(err) => {
            am.last_error = Set(Some(err.to_string()));
            if attempts >= config.max_attempts {
                error!(event_id = %event.id, kind = %event.kind, error = %err, "outbox event parked as failed");
                am.failed_at = Set(Some(now));
            } else {
                let delay = backoff_delay(attempts, config.backoff_base, config.backoff_max);
                am.next_attempt_at = Set(now
                    + chrono::Duration::from_std(delay).unwrap_or(chrono::Duration::zero()));
            }
        }
    }

    am.update(db).await.context("record outbox attempt")?;
    Ok(())
}

/// Exponential backoff capped at `max`, with jitter in [delay/2, delay].
fn backoff_delay(attempt: i32, base: Duration, max: Duration) -> Duration {
    let shift = attempt.saturating_sub(1).clamp(0, 31) as u32;
    let factor = 1u32 << shift;
    let delay = base.checked_mul(factor).unwrap_or(max).min(max);

    let delay_ms = delay.as_millis() as u64;
    if delay_ms < 2 {
        return delay;
    }
    let half = delay_ms / 2;
    let jitter = rand::rng().random_range(0..=half);
    Duration::from_millis(half + jitter)
}
