//! Save outcomes.
//!
//! - success clears dirty and posts the success notice
//! - failure keeps the sequence and dirty flag, shows the server detail
//! - a retry resends the identical full sequence

use std::time::{Duration, Instant};

use vmd_client::ApiError;
use vmd_desk::{ContentDesk, DeskError, NoticeKind, SwitchPolicy, SAVE_SUCCESS_MESSAGE};
use vmd_reconcile::Direction;
use vmd_testkit::{abc_contents, course, FakeBackend};

async fn desk() -> ContentDesk<FakeBackend> {
    let backend = FakeBackend::with_courses([(course(7, "Kurgu"), abc_contents())]);
    let desk = ContentDesk::new(backend);
    desk.select_course(7, SwitchPolicy::Force).await.unwrap();
    desk
}

fn titles(items: &[vmd_schemas::ContentItem]) -> Vec<String> {
    items.iter().map(|i| i.title.clone()).collect()
}

#[tokio::test]
async fn successful_save_clears_dirty_and_notifies() {
    let desk = desk().await;
    desk.move_item(1, Direction::Up).await.unwrap();
    assert!(desk.is_dirty().await);

    let outcome = desk.save().await.unwrap();
    assert!(outcome.now_clean);
    assert!(!desk.is_dirty().await);

    let notice = desk.current_notice().await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, SAVE_SUCCESS_MESSAGE);

    // The server now holds [B, A, C].
    let stored = desk.backend().stored_order(7).await;
    assert_eq!(
        stored.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
        vec!["quiz-1", "lesson-1", "lesson-2"]
    );
}

#[tokio::test]
async fn success_notice_expires_after_ttl() {
    let backend = FakeBackend::with_courses([(course(7, "Kurgu"), abc_contents())]);
    let desk = ContentDesk::with_success_ttl(backend, Duration::from_millis(3000));
    desk.select_course(7, SwitchPolicy::Force).await.unwrap();

    desk.save().await.unwrap();
    let later = Instant::now() + Duration::from_millis(3001);
    assert_eq!(desk.current_notice_at(later).await, None);
    // Once dropped it stays dropped.
    assert_eq!(desk.current_notice().await, None);
}

#[tokio::test]
async fn failed_save_preserves_sequence_and_dirty() {
    let desk = desk().await;
    desk.reorder(0, 2).await.unwrap();
    let before = desk.items().await;

    desk.backend()
        .fail_next_save(ApiError::Rejected {
            status: 400,
            message: Some("Sıralama geçersiz".to_string()),
        })
        .await;

    let err = desk.save().await.unwrap_err();
    assert!(matches!(err, DeskError::Api { ref message, .. } if message == "Sıralama geçersiz"));
    assert!(desk.is_dirty().await);
    assert_eq!(desk.items().await, before);
    assert_eq!(titles(&before), ["B", "C", "A"]);
    assert_eq!(desk.last_error().await.as_deref(), Some("Sıralama geçersiz"));

    let notice = desk.current_notice().await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[tokio::test]
async fn transport_failure_uses_fallback_message() {
    let desk = desk().await;
    desk.reorder(2, 0).await.unwrap();
    desk.backend()
        .fail_next_save(ApiError::Transport("connection reset".into()))
        .await;

    let err = desk.save().await.unwrap_err();
    assert_eq!(err.to_string(), "Kaydetme başarısız");
    assert!(desk.is_dirty().await);
}

#[tokio::test]
async fn retry_resends_identical_sequence() {
    let desk = desk().await;
    desk.reorder(0, 2).await.unwrap();
    desk.backend()
        .fail_next_save(ApiError::Rejected {
            status: 503,
            message: None,
        })
        .await;

    assert!(desk.save().await.is_err());
    let outcome = desk.save().await.unwrap();
    assert!(outcome.now_clean);
    assert_eq!(desk.last_error().await, None);

    let calls = desk.backend().reorder_calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn saving_a_clean_list_is_allowed() {
    let desk = desk().await;
    let outcome = desk.save().await.unwrap();
    assert!(outcome.now_clean);
    assert_eq!(outcome.sent.contents.len(), 3);
    assert_eq!(
        outcome.sent.contents.iter().map(|e| e.order).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn operations_without_a_course_are_rejected() {
    let desk = ContentDesk::new(FakeBackend::new());
    assert_eq!(desk.save().await.unwrap_err(), DeskError::NoCourseSelected);
    assert_eq!(
        desk.reorder(0, 1).await.unwrap_err(),
        DeskError::NoCourseSelected
    );
    assert!(desk.backend().reorder_calls().await.is_empty());
}

#[tokio::test]
async fn out_of_range_reorder_surfaces_as_error() {
    let desk = desk().await;
    let err = desk.reorder(0, 9).await.unwrap_err();
    assert!(matches!(err, DeskError::Reorder(_)), "{err:?}");
    assert!(!desk.is_dirty().await);
}
