//! Review moderation helpers.

use vmd_schemas::{Review, ReviewPage, ReviewStats};

/// Server-side status filter of the moderation list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    Pending,
    Approved,
    Hidden,
}

impl ReviewFilter {
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ReviewFilter::All => None,
            ReviewFilter::Pending => Some("pending"),
            ReviewFilter::Approved => Some("approved"),
            ReviewFilter::Hidden => Some("hidden"),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Some(ReviewFilter::All),
            "pending" => Some(ReviewFilter::Pending),
            "approved" => Some(ReviewFilter::Approved),
            "hidden" => Some(ReviewFilter::Hidden),
            _ => None,
        }
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

/// Client-side search over user name, content and title (case-insensitive).
/// A blank term matches everything.
pub fn search<'a>(reviews: &'a [Review], term: &str) -> Vec<&'a Review> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return reviews.iter().collect();
    }
    reviews
        .iter()
        .filter(|r| {
            contains_ci(r.user_name.as_deref(), &needle)
                || contains_ci(r.content.as_deref(), &needle)
                || contains_ci(r.title.as_deref(), &needle)
        })
        .collect()
}

/// Stats from the page, or a minimal fallback counting only the total.
pub fn stats_or_fallback(page: &ReviewPage) -> ReviewStats {
    page.stats.clone().unwrap_or_else(|| ReviewStats {
        total: page.reviews.len() as u64,
        ..ReviewStats::default()
    })
}

/// Display name with the anonymous fallback.
pub fn author(review: &Review) -> &str {
    review
        .user_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Anonim")
}
