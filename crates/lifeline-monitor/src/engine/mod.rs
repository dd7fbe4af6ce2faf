//! The escalation engine.
//!
//! Each evaluation rederives a user's state from their last check-in and the
//! suppression record:
//!
//! * `daysMissed >= email_after_days` with email enabled and an address set
//!   sends one reminder per local calendar day.
//! * `daysMissed >= sms_after_days` with auto alarm on texts every contact
//!   with a valid phone, once per distinct missed-day count.
//!
//! A window is recorded only after a successful delivery, so failed sends
//! are retried on the next tick. Store failures abort only the affected
//! user; `evaluate_all_users` fails only when users cannot be listed.

pub mod outcome;
pub mod policy;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use lifeline_core::config::MonitorConfig;
use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, LocalCalendar, UserId};
use lifeline_database::traits::{
    CheckInStore, ContactStore, SettingsStore, SuppressionStore, UserStore,
};
use lifeline_entity::contact::EmergencyContact;
use lifeline_entity::notification::{NotificationChannel, SuppressionKey};
use lifeline_entity::settings::UserSettings;
use lifeline_notify::{EmailSender, SmsSender};

pub use self::outcome::{BatchSummary, EmailOutcome, SkipReason, SmsOutcome, UserEvaluation};

/// The stores the engine reads.
#[derive(Debug, Clone)]
pub struct MonitorStores {
    /// User enumeration.
    pub users: Arc<dyn UserStore>,
    /// Check-in log.
    pub checkins: Arc<dyn CheckInStore>,
    /// Per-user settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Emergency contacts.
    pub contacts: Arc<dyn ContactStore>,
}

impl MonitorStores {
    /// Use one object for every store.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: UserStore + CheckInStore + SettingsStore + ContactStore,
    {
        Self {
            users: store.clone(),
            checkins: store.clone(),
            settings: store.clone(),
            contacts: store,
        }
    }
}

/// Periodic evaluator of every user's check-in state.
#[derive(Debug, Clone)]
pub struct EscalationEngine {
    stores: MonitorStores,
    suppression: Arc<dyn SuppressionStore>,
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    clock: Arc<dyn Clock>,
    calendar: LocalCalendar,
    config: Arc<MonitorConfig>,
}

impl EscalationEngine {
    /// Create an engine.
    pub fn new(
        stores: MonitorStores,
        suppression: Arc<dyn SuppressionStore>,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        clock: Arc<dyn Clock>,
        calendar: LocalCalendar,
        config: MonitorConfig,
    ) -> Self {
        Self {
            stores,
            suppression,
            email,
            sms,
            clock,
            calendar,
            config: Arc::new(config),
        }
    }

    /// Evaluate every user concurrently.
    ///
    /// Per-user failures are logged and counted; the batch always completes.
    pub async fn evaluate_all_users(&self) -> AppResult<BatchSummary> {
        let users = self.stores.users.list_all().await?;
        info!(users = users.len(), "Evaluating check-in status");

        let semaphore = Arc::new(Semaphore::new(self.config.user_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        for user in users {
            let engine = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                engine.evaluate_user(&user.id).await
            });
        }

        let mut summary = BatchSummary {
            users: tasks.len(),
            ..Default::default()
        };
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(evaluation) => summary.record(&evaluation),
                Err(e) => {
                    error!(error = %e, "User evaluation task aborted");
                    summary.failed += 1;
                }
            }
        }

        info!(
            users = summary.users,
            evaluated = summary.evaluated,
            skipped = summary.skipped,
            failed = summary.failed,
            emails_sent = summary.emails_sent,
            sms_escalations = summary.sms_escalations,
            "Check-in evaluation finished"
        );
        Ok(summary)
    }

    /// Evaluate one user. Safe to call at any time; never fails.
    pub async fn evaluate_user(&self, user_id: &UserId) -> UserEvaluation {
        let now = self.clock.now();
        let evaluation = match self.try_evaluate(user_id, now).await {
            Ok(evaluation) => evaluation,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "User evaluation failed");
                UserEvaluation::failed(user_id, now, e.to_string())
            }
        };
        self.collect_garbage(now).await;
        evaluation
    }

    async fn try_evaluate(&self, user_id: &UserId, now: DateTime<Utc>) -> AppResult<UserEvaluation> {
        let Some(settings) = self.stores.settings.find_by_user(user_id).await? else {
            debug!(user_id = %user_id, "No settings, skipping");
            return Ok(UserEvaluation::skipped(user_id, now, SkipReason::NoSettings));
        };

        let Some(last) = self.stores.checkins.find_last(user_id).await? else {
            debug!(user_id = %user_id, "Never checked in, skipping");
            return Ok(UserEvaluation::skipped(
                user_id,
                now,
                SkipReason::NeverCheckedIn,
            ));
        };

        let days_missed = policy::days_missed(last.checkin_time, now, &self.calendar);
        debug!(
            user_id = %user_id,
            last_check_in = %last.checkin_time,
            days_missed,
            "Evaluated check-in status"
        );

        let email = self
            .apply_email_rule(user_id, &settings, days_missed, now)
            .await?;
        let sms = self
            .apply_sms_rule(user_id, &settings, days_missed, now)
            .await?;

        Ok(UserEvaluation {
            user_id: user_id.clone(),
            evaluated_at: now,
            days_missed: Some(days_missed),
            skipped: None,
            email,
            sms,
            error: None,
        })
    }

    async fn apply_email_rule(
        &self,
        user_id: &UserId,
        settings: &UserSettings,
        days_missed: i64,
        now: DateTime<Utc>,
    ) -> AppResult<EmailOutcome> {
        if days_missed < self.config.email_after_days || !settings.email_notify {
            return Ok(EmailOutcome::NotDue);
        }
        let Some(address) = settings.reminder_email() else {
            return Ok(EmailOutcome::NotDue);
        };

        let key = SuppressionKey::email(user_id.clone(), self.calendar.today(now));
        if self.suppression.last_sent(&key).await?.is_some() {
            return Ok(EmailOutcome::AlreadySent);
        }

        let delivered = self
            .deliver(
                NotificationChannel::Email,
                address,
                self.email.send_reminder(address, days_missed),
            )
            .await;
        if !delivered {
            return Ok(EmailOutcome::Failed);
        }

        self.suppression.record_sent(&key, now).await?;
        info!(user_id = %user_id, days_missed, "Reminder email sent");
        Ok(EmailOutcome::Sent)
    }

    async fn apply_sms_rule(
        &self,
        user_id: &UserId,
        settings: &UserSettings,
        days_missed: i64,
        now: DateTime<Utc>,
    ) -> AppResult<SmsOutcome> {
        if days_missed < self.config.sms_after_days || !settings.auto_alarm {
            return Ok(SmsOutcome::NotDue);
        }

        // A filled slot re-arms once a full day has passed since the send.
        let key = SuppressionKey::sms(user_id.clone(), days_missed);
        if let Some(sent_at) = self.suppression.last_sent(&key).await? {
            if now - sent_at < Duration::days(1) {
                return Ok(SmsOutcome::AlreadySent);
            }
        }

        let contacts = self.stores.contacts.list_by_user(user_id).await?;
        if contacts.is_empty() {
            info!(user_id = %user_id, days_missed, "Escalation due but no emergency contacts");
            return Ok(SmsOutcome::NoContacts);
        }

        let total = contacts.len();
        info!(user_id = %user_id, days_missed, contacts = total, "Escalating to emergency contacts");

        let delivered = stream::iter(contacts.iter())
            .map(|contact| self.notify_contact(contact, days_missed))
            .buffer_unordered(self.config.contact_concurrency.max(1))
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .boxed()
            .await;

        if delivered == 0 {
            warn!(user_id = %user_id, days_missed, contacts = total, "No emergency text delivered");
            return Ok(SmsOutcome::Failed { total });
        }

        self.suppression.record_sent(&key, now).await?;
        info!(user_id = %user_id, delivered, total, "Emergency texts sent");
        Ok(SmsOutcome::Sent { delivered, total })
    }

    async fn notify_contact(&self, contact: &EmergencyContact, days_missed: i64) -> bool {
        if !self.sms.is_valid_phone(&contact.phone) {
            warn!(
                contact_id = %contact.id,
                phone = %contact.phone,
                "Invalid phone number, skipping contact"
            );
            return false;
        }
        let phone = self.sms.format_phone(&contact.phone);
        self.deliver(
            NotificationChannel::Sms,
            &phone,
            self.sms
                .send_emergency(&phone, &self.config.alert_user_name, days_missed),
        )
        .await
    }

    /// Await a send under the configured timeout. Errors and timeouts count
    /// as unsuccessful.
    async fn deliver<F>(&self, channel: NotificationChannel, target: &str, send: F) -> bool
    where
        F: Future<Output = AppResult<()>>,
    {
        let limit = StdDuration::from_secs(self.config.send_timeout_seconds);
        match tokio::time::timeout(limit, send).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(channel = %channel, target = %target, error = %e, "Send failed");
                false
            }
            Err(_) => {
                warn!(
                    channel = %channel,
                    target = %target,
                    timeout_secs = self.config.send_timeout_seconds,
                    "Send timed out"
                );
                false
            }
        }
    }

    async fn collect_garbage(&self, now: DateTime<Utc>) {
        let cutoff = now - Duration::days(self.config.suppression_retention_days);
        match self.suppression.purge_older_than(cutoff).await {
            Ok(0) => {}
            Ok(purged) => debug!(purged, "Purged expired suppression entries"),
            Err(e) => warn!(error = %e, "Failed to purge suppression entries"),
        }
    }
}
