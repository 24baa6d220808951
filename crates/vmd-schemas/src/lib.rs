//! vmd-schemas
//!
//! Wire types exchanged with the VideoMaster backend. Every other crate in the
//! workspace speaks these shapes; nothing here performs IO.

mod cart;
mod content;
mod review;
mod template;
pub mod timestamp;

pub use cart::*;
pub use content::*;
pub use review::*;
pub use template::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A course as listed by `GET /api/courses/admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_published: bool,
}

/// Error body carried by non-2xx responses.
///
/// `detail` is usually a string. Validation failures carry a list of
/// `{loc, msg, type}` objects instead, so the raw value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the server sent one.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|it| it.get("msg").and_then(Value::as_str))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_string_is_returned_verbatim() {
        let body: ErrorBody = serde_json::from_value(json!({"detail": "Kurs bulunamadı"})).unwrap();
        assert_eq!(body.detail_message().as_deref(), Some("Kurs bulunamadı"));
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [
                {"loc": ["body", "contents"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["query", "course_id"], "msg": "value is not a valid integer", "type": "type_error"}
            ]
        }))
        .unwrap();
        assert_eq!(
            body.detail_message().as_deref(),
            Some("field required; value is not a valid integer")
        );
    }

    #[test]
    fn missing_or_blank_detail_yields_none() {
        let empty: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.detail_message(), None);

        let blank: ErrorBody = serde_json::from_value(json!({"detail": "  "})).unwrap();
        assert_eq!(blank.detail_message(), None);
    }

    #[test]
    fn course_tolerates_sparse_rows() {
        let c: Course = serde_json::from_value(json!({"id": 3, "title": "Kurgu 101"})).unwrap();
        assert_eq!(c.id, 3);
        assert!(!c.is_published);
        assert_eq!(c.description, None);
    }
}
