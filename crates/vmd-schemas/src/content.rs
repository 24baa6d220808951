use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a course content item, as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Lesson,
    Quiz,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Lesson => "lesson",
            ContentType::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific payload of a content item.
///
/// The `content_type` tag selects the variant, so a lesson can never carry a
/// quiz's `question_count` (and vice versa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "lowercase")]
pub enum ContentKind {
    Lesson {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_seconds: Option<u32>,
    },
    Quiz {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_count: Option<u32>,
    },
}

impl ContentKind {
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentKind::Lesson { .. } => ContentType::Lesson,
            ContentKind::Quiz { .. } => ContentType::Quiz,
        }
    }
}

/// Identity of a content item within a course: `(content_type, content_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentRef {
    pub content_type: ContentType,
    pub content_id: i64,
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.content_type, self.content_id)
    }
}

/// One row of `GET /api/quizzes/admin/course/{id}/contents`.
///
/// Round-tripped unchanged except for `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Backend row id of the ordering record, when the server sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content_id: i64,
    #[serde(default)]
    pub title: String,
    /// Dense, 1-based position within the course.
    #[serde(default)]
    pub order: u32,
    #[serde(flatten)]
    pub kind: ContentKind,
}

impl ContentItem {
    pub fn lesson(content_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: None,
            content_id,
            title: title.into(),
            order: 0,
            kind: ContentKind::Lesson {
                duration_seconds: None,
            },
        }
    }

    pub fn quiz(content_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: None,
            content_id,
            title: title.into(),
            order: 0,
            kind: ContentKind::Quiz {
                question_count: None,
            },
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    pub fn content_ref(&self) -> ContentRef {
        ContentRef {
            content_type: self.content_type(),
            content_id: self.content_id,
        }
    }

    /// Wire entry for the bulk reorder body.
    pub fn order_entry(&self) -> ContentOrderEntry {
        ContentOrderEntry {
            content_type: self.content_type(),
            content_id: self.content_id,
            order: self.order,
        }
    }

    /// Short secondary line shown next to the title ("12 dk", "5 soru").
    pub fn meta_label(&self) -> Option<String> {
        match self.kind {
            ContentKind::Lesson {
                duration_seconds: Some(secs),
            } if secs > 0 => Some(format!("{} dk", secs / 60)),
            ContentKind::Lesson { .. } => None,
            ContentKind::Quiz { question_count } => {
                Some(format!("{} soru", question_count.unwrap_or(0)))
            }
        }
    }
}

/// One `{content_type, content_id, order}` tuple of a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentOrderEntry {
    pub content_type: ContentType,
    pub content_id: i64,
    pub order: u32,
}

/// Body of `POST /api/quizzes/admin/course/{id}/contents/reorder`.
///
/// Always carries the full sequence; the server replaces its state wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub contents: Vec<ContentOrderEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lesson_row_decodes_into_lesson_variant() {
        let item: ContentItem = serde_json::from_value(json!({
            "id": 17,
            "content_type": "lesson",
            "content_id": 4,
            "order": 0,
            "title": "Giriş",
            "duration_seconds": 754
        }))
        .unwrap();

        assert_eq!(item.id, Some(17));
        assert_eq!(item.content_type(), ContentType::Lesson);
        assert_eq!(
            item.kind,
            ContentKind::Lesson {
                duration_seconds: Some(754)
            }
        );
        assert_eq!(item.meta_label().as_deref(), Some("12 dk"));
    }

    #[test]
    fn quiz_row_without_count_shows_zero_questions() {
        let item: ContentItem = serde_json::from_value(json!({
            "content_type": "quiz",
            "content_id": 9,
            "order": 2,
            "title": "Ara sınav"
        }))
        .unwrap();

        assert_eq!(item.content_ref().to_string(), "quiz-9");
        assert_eq!(item.meta_label().as_deref(), Some("0 soru"));
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        let res: Result<ContentItem, _> = serde_json::from_value(json!({
            "content_type": "assignment",
            "content_id": 1,
            "order": 1,
            "title": "x"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn item_serializes_with_type_tag() {
        let item = ContentItem::quiz(3, "Final").with_order(5);
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["content_type"], "quiz");
        assert_eq!(v["content_id"], 3);
        assert_eq!(v["order"], 5);
        assert!(v.get("id").is_none());
        assert!(v.get("question_count").is_none());
    }

    #[test]
    fn reorder_request_wire_shape() {
        let req = ReorderRequest {
            contents: vec![ContentItem::lesson(2, "a").with_order(1).order_entry()],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"contents": [{"content_type": "lesson", "content_id": 2, "order": 1}]})
        );
    }
}
