//! Carts, reviews and email templates against a mock backend.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use vmd_admin::cart::StageFilter;
use vmd_admin::reviews::ReviewFilter;
use vmd_client::{AdminClient, ApiError, Session};
use vmd_schemas::{EmailTemplateUpdate, RecoveryAction};

fn bearer_client(server: &MockServer) -> AdminClient {
    let session = Session::new(server.base_url()).with_bearer_token("tok");
    AdminClient::new(session, Duration::from_secs(5)).unwrap()
}

fn key_client(server: &MockServer) -> AdminClient {
    let session = Session::new(server.base_url()).with_admin_key("k-1");
    AdminClient::new(session, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn abandoned_orders_pass_stage_filter() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/cart/admin/abandoned")
                .query_param("stage", "24hour");
            then.status(200).json_body(json!([{
                "id": 4,
                "order_code": "VM-0004",
                "user_email": "a@b.c",
                "amount": 749.0,
                "abandoned_at": "2025-03-01T10:00:00Z",
                "recovery_email_1_sent": true
            }]));
        })
        .await;

    let orders = bearer_client(&server)
        .abandoned_orders(StageFilter::OneDay)
        .await
        .unwrap();
    m.assert_async().await;
    assert_eq!(orders.len(), 1);
    assert!(orders[0].recovery_email_1_sent);
}

#[tokio::test]
async fn trigger_and_manual_send() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/cart/admin/trigger-emails");
            then.status(200).json_body(json!({"emails_sent": 3}));
        })
        .await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/cart/admin/send-email/4")
                .json_body(json!({"stage": "send1"}));
            then.status(200);
        })
        .await;

    let c = bearer_client(&server);
    assert_eq!(c.trigger_recovery_emails().await.unwrap().emails_sent, 3);

    let ack = c
        .send_recovery_email(4, RecoveryAction::Send1)
        .await
        .unwrap();
    assert_eq!(ack.message, None);
    send.assert_async().await;
}

#[tokio::test]
async fn review_toggles_send_negation() {
    let server = MockServer::start_async().await;
    let approve = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/reviews/admin/9/approve")
                .json_body(json!({"is_approved": false}));
            then.status(200).json_body(json!({"message": "ok"}));
        })
        .await;
    let hide = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/reviews/admin/9/visibility")
                .json_body(json!({"is_visible": false}));
            then.status(200).json_body(json!({"message": "ok"}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/reviews/admin/9");
            then.status(204);
        })
        .await;

    let c = bearer_client(&server);
    c.toggle_review_approval(9, true).await.unwrap();
    c.toggle_review_visibility(9, true).await.unwrap();
    c.delete_review(9).await.unwrap();

    approve.assert_async().await;
    hide.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn reviews_list_with_status_filter() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/reviews/admin/")
                .query_param("status", "pending");
            then.status(200).json_body(json!({
                "reviews": [{"id": 1, "rating": 4, "is_approved": false}],
                "stats": {"total": 1, "approved": 0, "pending": 1, "hidden": 0, "averageRating": 4.0}
            }));
        })
        .await;

    let page = bearer_client(&server)
        .list_reviews(ReviewFilter::Pending)
        .await
        .unwrap();
    assert_eq!(page.reviews.len(), 1);
    assert_eq!(page.stats.map(|s| s.pending), Some(1));
}

#[tokio::test]
async fn templates_authenticate_by_query_key() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/admin/email-templates/")
                .query_param("admin_key", "k-1");
            then.status(200).json_body(json!([{
                "name": "welcome",
                "display_name": "Hoş geldin",
                "subject": "Merhaba {full_name}",
                "html_content": "<p>{full_name}</p>",
                "variables": "[\"full_name\"]"
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/email-templates/seed-defaults")
                .query_param("admin_key", "k-1");
            then.status(200)
                .json_body(json!({"created": ["welcome", "password_reset"]}));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/email-templates/welcome")
                .query_param("admin_key", "k-1")
                .json_body(json!({
                    "display_name": "Hoş geldin",
                    "subject": "Selam {full_name}",
                    "html_content": "<p>{full_name}</p>",
                    "description": ""
                }));
            then.status(200).json_body(json!({
                "name": "welcome",
                "display_name": "Hoş geldin",
                "subject": "Selam {full_name}",
                "html_content": "<p>{full_name}</p>"
            }));
        })
        .await;

    let c = key_client(&server);
    let templates = c.list_email_templates().await.unwrap();
    list.assert_async().await;
    assert_eq!(templates[0].variable_names(), vec!["full_name".to_string()]);

    assert_eq!(
        c.seed_default_templates().await.unwrap().created,
        vec!["welcome".to_string(), "password_reset".to_string()]
    );

    let mut body: EmailTemplateUpdate = templates[0].to_update();
    body.subject = "Selam {full_name}".to_string();
    let stored = c.update_email_template("welcome", &body).await.unwrap();
    update.assert_async().await;
    assert_eq!(stored.subject, "Selam {full_name}");
}

#[tokio::test]
async fn template_forbidden_is_unauthenticated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/admin/email-templates/");
            then.status(403).json_body(json!({"detail": "Invalid admin key"}));
        })
        .await;

    let err = key_client(&server).list_email_templates().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
}

#[tokio::test]
async fn bearer_forbidden_stays_a_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/cart/admin/stats");
            then.status(403).json_body(json!({"detail": "Admin yetkisi gerekli"}));
        })
        .await;

    let err = bearer_client(&server).cart_stats().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 403,
            message: Some("Admin yetkisi gerekli".to_string())
        }
    );
}
