//! Abandoned-cart recovery stages.
//!
//! # Recovery schedule
//!
//! | Email | Eligible after | Content              |
//! |-------|----------------|----------------------|
//! | 1     | 1 hour         | reminder             |
//! | 2     | 24 hours       | last-chance          |
//! | 3     | 72 hours       | 10% discount code    |
//!
//! Thresholds are measured from `abandoned_at`. Emails are strictly
//! sequential: email 2 is never suggested before email 1 has been sent.

use chrono::{DateTime, Duration, Utc};
use vmd_schemas::{AbandonedOrder, RecoveryAction};

pub const FIRST_EMAIL_AFTER_HOURS: i64 = 1;
pub const SECOND_EMAIL_AFTER_HOURS: i64 = 24;
pub const THIRD_EMAIL_AFTER_HOURS: i64 = 72;

/// Highest recovery email already sent for an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EmailStage {
    NotSent,
    First,
    Second,
    Third,
}

impl EmailStage {
    pub fn number(self) -> u8 {
        match self {
            EmailStage::NotSent => 0,
            EmailStage::First => 1,
            EmailStage::Second => 2,
            EmailStage::Third => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmailStage::NotSent => "Email Gonderilmedi",
            EmailStage::First => "1. Email Gonderildi",
            EmailStage::Second => "2. Email Gonderildi",
            EmailStage::Third => "3. Email Gonderildi",
        }
    }
}

/// Stage badge for an order. The highest set flag wins, even if an earlier
/// flag is (inconsistently) unset.
pub fn email_stage(order: &AbandonedOrder) -> EmailStage {
    if order.recovery_email_3_sent {
        EmailStage::Third
    } else if order.recovery_email_2_sent {
        EmailStage::Second
    } else if order.recovery_email_1_sent {
        EmailStage::First
    } else {
        EmailStage::NotSent
    }
}

fn hours_since(abandoned_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - abandoned_at).num_milliseconds() as f64 / 3_600_000.0
}

/// The recovery email that is due now, if any.
///
/// Orders without an `abandoned_at` timestamp are never due.
pub fn next_action(order: &AbandonedOrder, now: DateTime<Utc>) -> Option<RecoveryAction> {
    let hours = hours_since(order.abandoned_at?, now);

    if !order.recovery_email_1_sent && hours >= FIRST_EMAIL_AFTER_HOURS as f64 {
        return Some(RecoveryAction::Send1);
    }
    if order.recovery_email_1_sent
        && !order.recovery_email_2_sent
        && hours >= SECOND_EMAIL_AFTER_HOURS as f64
    {
        return Some(RecoveryAction::Send2);
    }
    if order.recovery_email_2_sent
        && !order.recovery_email_3_sent
        && hours >= THIRD_EMAIL_AFTER_HOURS as f64
    {
        return Some(RecoveryAction::Send3);
    }
    None
}

/// A manual first email can be sent at any time until it has gone out.
pub fn can_send_first_manually(order: &AbandonedOrder) -> bool {
    !order.recovery_email_1_sent
}

/// Coarse "how long ago" bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elapsed {
    JustNow,
    Hours(i64),
    Days(i64),
}

impl Elapsed {
    pub fn label(self) -> String {
        match self {
            Elapsed::JustNow => "Az once".to_string(),
            Elapsed::Hours(h) => format!("{h} saat once"),
            Elapsed::Days(d) => format!("{d} gun once"),
        }
    }
}

/// Display label for the time since abandonment.
pub fn elapsed_label(abandoned_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    elapsed_since(abandoned_at, now).label()
}

pub fn elapsed_since(abandoned_at: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let hours = (now - abandoned_at).num_hours();
    if hours < 1 {
        Elapsed::JustNow
    } else if hours < 24 {
        Elapsed::Hours(hours)
    } else {
        Elapsed::Days(hours / 24)
    }
}

/// List filter on the abandoned-carts screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StageFilter {
    #[default]
    All,
    OneHour,
    OneDay,
    ThreeDays,
}

impl StageFilter {
    /// Value of the `stage` query parameter; `None` for no filter.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            StageFilter::All => None,
            StageFilter::OneHour => Some("1hour"),
            StageFilter::OneDay => Some("24hour"),
            StageFilter::ThreeDays => Some("72hour"),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Some(StageFilter::All),
            "1hour" | "1h" => Some(StageFilter::OneHour),
            "24hour" | "24h" => Some(StageFilter::OneDay),
            "72hour" | "72h" => Some(StageFilter::ThreeDays),
            _ => None,
        }
    }

    /// Minimum age an order must have to show under this filter.
    pub fn min_age(self) -> Duration {
        match self {
            StageFilter::All => Duration::zero(),
            StageFilter::OneHour => Duration::hours(FIRST_EMAIL_AFTER_HOURS),
            StageFilter::OneDay => Duration::hours(SECOND_EMAIL_AFTER_HOURS),
            StageFilter::ThreeDays => Duration::hours(THIRD_EMAIL_AFTER_HOURS),
        }
    }
}
