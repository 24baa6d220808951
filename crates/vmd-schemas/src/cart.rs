use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A checkout that never reached payment, as listed by
/// `GET /api/cart/admin/abandoned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbandonedOrder {
    pub id: i64,
    #[serde(default)]
    pub order_code: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, with = "crate::timestamp::option")]
    pub abandoned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recovery_email_1_sent: bool,
    #[serde(default)]
    pub recovery_email_2_sent: bool,
    #[serde(default)]
    pub recovery_email_3_sent: bool,
    #[serde(default)]
    pub recovery_token: Option<String>,
}

/// Aggregates from `GET /api/cart/admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartStats {
    #[serde(default)]
    pub total_abandoned: u64,
    #[serde(default)]
    pub recovered: u64,
    #[serde(default)]
    pub pending_emails: u64,
    /// Percentage, 0..=100.
    #[serde(default)]
    pub recovery_rate: f64,
    #[serde(default)]
    pub potential_revenue: f64,
}

/// Which recovery email to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecoveryAction {
    #[serde(rename = "send1")]
    Send1,
    #[serde(rename = "send2")]
    Send2,
    #[serde(rename = "send3")]
    Send3,
}

impl RecoveryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryAction::Send1 => "send1",
            RecoveryAction::Send2 => "send2",
            RecoveryAction::Send3 => "send3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "send1" | "1" => Some(RecoveryAction::Send1),
            "send2" | "2" => Some(RecoveryAction::Send2),
            "send3" | "3" => Some(RecoveryAction::Send3),
            _ => None,
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/cart/admin/send-email/{order_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub stage: RecoveryAction,
}

/// Response of `POST /api/cart/admin/trigger-emails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEmailsResponse {
    #[serde(default)]
    pub emails_sent: u64,
}
