//! Results of evaluating users.

use chrono::{DateTime, Utc};
use serde::Serialize;

use lifeline_core::types::UserId;

/// Why a user was not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No settings row.
    NoSettings,
    /// No check-in yet.
    NeverCheckedIn,
}

/// What the email rule did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailOutcome {
    /// Threshold not reached, disabled, or no address.
    NotDue,
    /// A reminder already went out today.
    AlreadySent,
    /// Reminder delivered and recorded.
    Sent,
    /// Delivery failed; the window stays open.
    Failed,
}

/// What the SMS rule did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmsOutcome {
    /// Threshold not reached or auto alarm off.
    NotDue,
    /// This missed-day count was already escalated.
    AlreadySent,
    /// Escalation due but the user has no contacts.
    NoContacts,
    /// At least one contact was reached; the window is recorded.
    Sent {
        /// Contacts reached.
        delivered: usize,
        /// Contacts attempted.
        total: usize,
    },
    /// No contact was reached; the window stays open.
    Failed {
        /// Contacts attempted.
        total: usize,
    },
}

/// Result of one user evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEvaluation {
    /// The evaluated user.
    pub user_id: UserId,
    /// Instant the evaluation used as "now".
    pub evaluated_at: DateTime<Utc>,
    /// Missed days, when the user was evaluated.
    pub days_missed: Option<i64>,
    /// Set when the user was skipped.
    pub skipped: Option<SkipReason>,
    /// Email rule result.
    pub email: EmailOutcome,
    /// SMS rule result.
    pub sms: SmsOutcome,
    /// Set when a store failure aborted the evaluation.
    pub error: Option<String>,
}

impl UserEvaluation {
    pub(crate) fn skipped(user_id: &UserId, at: DateTime<Utc>, reason: SkipReason) -> Self {
        Self {
            user_id: user_id.clone(),
            evaluated_at: at,
            days_missed: None,
            skipped: Some(reason),
            email: EmailOutcome::NotDue,
            sms: SmsOutcome::NotDue,
            error: None,
        }
    }

    pub(crate) fn failed(user_id: &UserId, at: DateTime<Utc>, error: String) -> Self {
        Self {
            error: Some(error),
            skipped: None,
            ..Self::skipped(user_id, at, SkipReason::NoSettings)
        }
    }

    /// Whether the evaluation was aborted by an error.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals for one batch over all users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Users found.
    pub users: usize,
    /// Users evaluated to completion.
    pub evaluated: usize,
    /// Users skipped.
    pub skipped: usize,
    /// Users whose evaluation failed.
    pub failed: usize,
    /// Reminder emails delivered.
    pub emails_sent: usize,
    /// SMS escalations recorded.
    pub sms_escalations: usize,
}

impl BatchSummary {
    pub(crate) fn record(&mut self, evaluation: &UserEvaluation) {
        if evaluation.is_failure() {
            self.failed += 1;
            return;
        }
        if evaluation.skipped.is_some() {
            self.skipped += 1;
            return;
        }
        self.evaluated += 1;
        if evaluation.email == EmailOutcome::Sent {
            self.emails_sent += 1;
        }
        if matches!(evaluation.sms, SmsOutcome::Sent { .. }) {
            self.sms_escalations += 1;
        }
    }
}
