use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A learner review awaiting (or past) moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub helpful_count: Option<u32>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_visible() -> bool {
    true
}

/// Moderation counters. The backend spells the average in camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub hidden: u64,
    #[serde(default, rename = "averageRating", alias = "average_rating")]
    pub average_rating: f64,
}

/// Response of `GET /api/reviews/admin/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub stats: Option<ReviewStats>,
}

/// Body of `POST /api/reviews/admin/{id}/approve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub is_approved: bool,
}

/// Body of `POST /api/reviews/admin/{id}/visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub is_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_with_camel_case_average() {
        let page: ReviewPage = serde_json::from_value(json!({
            "reviews": [{"id": 1, "rating": 5, "is_approved": true}],
            "stats": {"total": 1, "approved": 1, "pending": 0, "hidden": 0, "averageRating": 5.0}
        }))
        .unwrap();

        assert_eq!(page.reviews.len(), 1);
        assert!(page.reviews[0].is_visible);
        assert_eq!(page.stats.map(|s| s.average_rating), Some(5.0));
    }

    #[test]
    fn page_without_stats() {
        let page: ReviewPage = serde_json::from_value(json!({"reviews": []})).unwrap();
        assert!(page.stats.is_none());
    }
}
