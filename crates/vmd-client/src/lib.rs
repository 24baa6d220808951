//! vmd-client
//!
//! Async REST client for the VideoMaster admin backend.
//!
//! Credentials come from an explicit [`Session`]. Every call is a single
//! request: no retries, no queueing, no cancellation. Tokens and admin keys
//! are never logged.

mod error;
mod session;

pub use error::*;
pub use session::Session;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use vmd_admin::cart::StageFilter;
use vmd_admin::reviews::ReviewFilter;
use vmd_schemas::{
    AbandonedOrder, ApiMessage, ApprovalRequest, CartStats, ContentItem, Course, EmailTemplate,
    EmailTemplateUpdate, ErrorBody, RecoveryAction, ReorderRequest, ReviewPage,
    SeedDefaultsResponse, SendEmailRequest, TriggerEmailsResponse, VisibilityRequest,
};

/// The three calls the content-order desk needs.
///
/// [`AdminClient`] is the production implementation; tests substitute an
/// in-memory fake.
#[async_trait::async_trait]
pub trait ContentBackend: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;

    async fn fetch_contents(&self, course_id: i64) -> Result<Vec<ContentItem>, ApiError>;

    /// Bulk replace: the server's order for `course_id` becomes exactly
    /// `request`.
    async fn replace_content_order(
        &self,
        course_id: i64,
        request: &ReorderRequest,
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `?admin_key=<key>`, email-template endpoints only.
    AdminKey,
}

#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    session: Session,
}

impl AdminClient {
    pub fn new(session: Session, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;
        Ok(Self { http, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.session.base_url(), path)
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> Result<RequestBuilder, ApiError> {
        let rb = self.http.request(method, self.url(path));
        match auth {
            Auth::Bearer => {
                let token = self.session.bearer_token().ok_or(ApiError::Unauthenticated)?;
                Ok(rb.bearer_auth(token))
            }
            Auth::AdminKey => {
                let key = self.session.admin_key().ok_or(ApiError::Unauthenticated)?;
                Ok(rb.query(&[("admin_key", key)]))
            }
        }
    }

    async fn execute(
        &self,
        rb: RequestBuilder,
        method: &Method,
        path: &str,
        auth: Auth,
    ) -> Result<Response, ApiError> {
        let resp = rb.send().await.map_err(|e| {
            // without_url: the admin key travels in the query string.
            let e = e.without_url();
            warn!(%method, path, error = %e, "admin api transport failure");
            ApiError::Transport(e.to_string())
        })?;

        let status = resp.status();
        debug!(%method, path, status = status.as_u16(), "admin api");
        if status.is_success() {
            return Ok(resp);
        }

        if status.as_u16() == 401 || (auth == Auth::AdminKey && status.as_u16() == 403) {
            warn!(%method, path, status = status.as_u16(), "admin api unauthenticated");
            return Err(ApiError::Unauthenticated);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.detail_message());
        warn!(
            %method,
            path,
            status = status.as_u16(),
            detail = message.as_deref().unwrap_or("-"),
            "admin api rejected"
        );
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let rb = self.request(method.clone(), path, auth)?.query(query);
        let resp = self.execute(rb, &method, path, auth).await?;
        decode(resp).await
    }

    async fn call_with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        auth: Auth,
        body: &B,
    ) -> Result<Response, ApiError> {
        let rb = self.request(method.clone(), path, auth)?.json(body);
        self.execute(rb, &method, path, auth).await
    }

    // -----------------
    // Content ordering
    // -----------------

    pub async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.call(Method::GET, "/api/courses/admin", Auth::Bearer, &[])
            .await
    }

    pub async fn fetch_contents(&self, course_id: i64) -> Result<Vec<ContentItem>, ApiError> {
        let path = format!("/api/quizzes/admin/course/{course_id}/contents");
        self.call(Method::GET, &path, Auth::Bearer, &[]).await
    }

    pub async fn replace_content_order(
        &self,
        course_id: i64,
        request: &ReorderRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/api/quizzes/admin/course/{course_id}/contents/reorder");
        self.call_with_body(Method::POST, &path, Auth::Bearer, request)
            .await?;
        debug!(course_id, items = request.contents.len(), "content order replaced");
        Ok(())
    }

    // -----------------
    // Abandoned carts
    // -----------------

    pub async fn abandoned_orders(
        &self,
        filter: StageFilter,
    ) -> Result<Vec<AbandonedOrder>, ApiError> {
        let query: Vec<(&str, &str)> = filter
            .query_value()
            .map(|v| vec![("stage", v)])
            .unwrap_or_default();
        self.call(Method::GET, "/api/cart/admin/abandoned", Auth::Bearer, &query)
            .await
    }

    pub async fn cart_stats(&self) -> Result<CartStats, ApiError> {
        self.call(Method::GET, "/api/cart/admin/stats", Auth::Bearer, &[])
            .await
    }

    /// Let the server send every recovery email that is due.
    pub async fn trigger_recovery_emails(&self) -> Result<TriggerEmailsResponse, ApiError> {
        self.call(Method::POST, "/api/cart/admin/trigger-emails", Auth::Bearer, &[])
            .await
    }

    pub async fn send_recovery_email(
        &self,
        order_id: i64,
        stage: RecoveryAction,
    ) -> Result<ApiMessage, ApiError> {
        let path = format!("/api/cart/admin/send-email/{order_id}");
        let resp = self
            .call_with_body(Method::POST, &path, Auth::Bearer, &SendEmailRequest { stage })
            .await?;
        decode_or_default(resp).await
    }

    // -----------------
    // Reviews
    // -----------------

    pub async fn list_reviews(&self, filter: ReviewFilter) -> Result<ReviewPage, ApiError> {
        let query: Vec<(&str, &str)> = filter
            .query_value()
            .map(|v| vec![("status", v)])
            .unwrap_or_default();
        self.call(Method::GET, "/api/reviews/admin/", Auth::Bearer, &query)
            .await
    }

    /// Flip approval: sends the negation of `currently_approved`.
    pub async fn toggle_review_approval(
        &self,
        review_id: i64,
        currently_approved: bool,
    ) -> Result<(), ApiError> {
        let path = format!("/api/reviews/admin/{review_id}/approve");
        let body = ApprovalRequest {
            is_approved: !currently_approved,
        };
        self.call_with_body(Method::POST, &path, Auth::Bearer, &body)
            .await?;
        Ok(())
    }

    /// Flip visibility: sends the negation of `currently_visible`.
    pub async fn toggle_review_visibility(
        &self,
        review_id: i64,
        currently_visible: bool,
    ) -> Result<(), ApiError> {
        let path = format!("/api/reviews/admin/{review_id}/visibility");
        let body = VisibilityRequest {
            is_visible: !currently_visible,
        };
        self.call_with_body(Method::POST, &path, Auth::Bearer, &body)
            .await?;
        Ok(())
    }

    pub async fn delete_review(&self, review_id: i64) -> Result<(), ApiError> {
        let path = format!("/api/reviews/admin/{review_id}");
        let rb = self.request(Method::DELETE, &path, Auth::Bearer)?;
        self.execute(rb, &Method::DELETE, &path, Auth::Bearer)
            .await?;
        Ok(())
    }

    // -----------------
    // Email templates
    // -----------------

    pub async fn list_email_templates(&self) -> Result<Vec<EmailTemplate>, ApiError> {
        self.call(Method::GET, "/api/admin/email-templates/", Auth::AdminKey, &[])
            .await
    }

    pub async fn seed_default_templates(&self) -> Result<SeedDefaultsResponse, ApiError> {
        self.call(
            Method::POST,
            "/api/admin/email-templates/seed-defaults",
            Auth::AdminKey,
            &[],
        )
        .await
    }

    /// Returns the template as stored by the server.
    pub async fn update_email_template(
        &self,
        name: &str,
        update: &EmailTemplateUpdate,
    ) -> Result<EmailTemplate, ApiError> {
        let path = format!("/api/admin/email-templates/{name}");
        let resp = self
            .call_with_body(Method::PUT, &path, Auth::AdminKey, update)
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.without_url().to_string()))
}

/// Acknowledgement bodies are optional; an empty body decodes to `T::default()`.
async fn decode_or_default<T: DeserializeOwned + Default>(resp: Response) -> Result<T, ApiError> {
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.without_url().to_string()))?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ContentBackend for AdminClient {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        AdminClient::list_courses(self).await
    }

    async fn fetch_contents(&self, course_id: i64) -> Result<Vec<ContentItem>, ApiError> {
        AdminClient::fetch_contents(self, course_id).await
    }

    async fn replace_content_order(
        &self,
        course_id: i64,
        request: &ReorderRequest,
    ) -> Result<(), ApiError> {
        AdminClient::replace_content_order(self, course_id, request).await
    }
}
