use serde::{Deserialize, Serialize};

/// A transactional email template managed under `/api/admin/email-templates/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Stable key used in URLs (e.g. `password_reset`).
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON-encoded list of placeholder names, e.g. `["full_name","code"]`.
    #[serde(default)]
    pub variables: Option<String>,
}

impl EmailTemplate {
    /// Placeholder names advertised by the template. Malformed lists decode to
    /// an empty vec.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
    }

    /// Editable fields, pre-filled from the current template.
    pub fn to_update(&self) -> EmailTemplateUpdate {
        EmailTemplateUpdate {
            display_name: self.display_name.clone(),
            subject: self.subject.clone(),
            html_content: self.html_content.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// Body of `PUT /api/admin/email-templates/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplateUpdate {
    pub display_name: String,
    pub subject: String,
    pub html_content: String,
    pub description: String,
}

/// Response of `POST /api/admin/email-templates/seed-defaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDefaultsResponse {
    #[serde(default)]
    pub created: Vec<String>,
}
