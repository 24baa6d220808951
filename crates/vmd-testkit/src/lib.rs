//! vmd-testkit
//!
//! Deterministic in-memory [`ContentBackend`] for desk tests.
//!
//! Behaves like the real backend for the three content-ordering calls: a
//! bulk replace rewrites the stored order, and later fetches return it. Saves
//! and fetches can be scripted to fail, or held open so a test can act while a
//! request is in flight. No network, no timers.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use vmd_client::{ApiError, ContentBackend};
use vmd_schemas::{ContentItem, ContentRef, Course, ReorderRequest};

/// Shorthand for a published course.
pub fn course(id: i64, title: &str) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: None,
        thumbnail_url: None,
        order: 0,
        is_published: true,
    }
}

/// `[A(lesson,1), B(quiz,1), C(lesson,2)]`, the canonical three-item list.
pub fn abc_contents() -> Vec<ContentItem> {
    vec![
        ContentItem::lesson(1, "A").with_order(0),
        ContentItem::quiz(1, "B").with_order(1),
        ContentItem::lesson(2, "C").with_order(2),
    ]
}

#[derive(Default)]
struct State {
    courses: Vec<Course>,
    contents: BTreeMap<i64, Vec<ContentItem>>,
    reorder_calls: Vec<(i64, ReorderRequest)>,
    fetch_calls: Vec<i64>,
    fail_next_save: Option<ApiError>,
    fail_next_fetch: Option<ApiError>,
    fail_courses: Option<ApiError>,
    hold_saves: bool,
    hold_fetches: bool,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
    save_entered: Arc<Notify>,
    save_release: Arc<Notify>,
    fetch_entered: Arc<Notify>,
    fetch_release: Arc<Notify>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with courses and their current server-side contents,
    /// listed in the given order.
    pub fn with_courses(seed: impl IntoIterator<Item = (Course, Vec<ContentItem>)>) -> Self {
        let mut st = State::default();
        for (course, contents) in seed {
            st.contents.insert(course.id, contents);
            st.courses.push(course);
        }
        Self {
            state: Arc::new(Mutex::new(st)),
            ..Self::default()
        }
    }

    pub async fn fail_next_save(&self, err: ApiError) {
        self.state.lock().await.fail_next_save = Some(err);
    }

    pub async fn fail_next_fetch(&self, err: ApiError) {
        self.state.lock().await.fail_next_fetch = Some(err);
    }

    pub async fn fail_course_list(&self, err: ApiError) {
        self.state.lock().await.fail_courses = Some(err);
    }

    /// Park every subsequent save until [`FakeBackend::release_save`].
    pub async fn hold_saves(&self) {
        self.state.lock().await.hold_saves = true;
    }

    /// Resolves once a held save has reached the backend.
    pub async fn wait_save_entered(&self) {
        self.save_entered.notified().await;
    }

    /// Let one parked save complete.
    pub fn release_save(&self) {
        self.save_release.notify_one();
    }

    /// Park every subsequent content fetch until [`FakeBackend::release_fetch`].
    pub async fn hold_fetches(&self) {
        self.state.lock().await.hold_fetches = true;
    }

    pub async fn wait_fetch_entered(&self) {
        self.fetch_entered.notified().await;
    }

    pub fn release_fetch(&self) {
        self.fetch_release.notify_one();
    }

    /// Every bulk replace that reached the backend, in arrival order.
    pub async fn reorder_calls(&self) -> Vec<(i64, ReorderRequest)> {
        self.state.lock().await.reorder_calls.clone()
    }

    pub async fn fetch_calls(&self) -> Vec<i64> {
        self.state.lock().await.fetch_calls.clone()
    }

    /// Server-side order for `course_id`.
    pub async fn stored_order(&self, course_id: i64) -> Vec<ContentRef> {
        self.state
            .lock()
            .await
            .contents
            .get(&course_id)
            .map(|items| items.iter().map(ContentItem::content_ref).collect())
            .unwrap_or_default()
    }

    /// Out-of-band server edit, as if another admin had saved.
    pub async fn set_contents(&self, course_id: i64, contents: Vec<ContentItem>) {
        self.state.lock().await.contents.insert(course_id, contents);
    }
}

#[async_trait::async_trait]
impl ContentBackend for FakeBackend {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let mut st = self.state.lock().await;
        if let Some(err) = st.fail_courses.take() {
            return Err(err);
        }
        Ok(st.courses.clone())
    }

    async fn fetch_contents(&self, course_id: i64) -> Result<Vec<ContentItem>, ApiError> {
        let hold = {
            let mut st = self.state.lock().await;
            st.fetch_calls.push(course_id);
            st.hold_fetches
        };

        if hold {
            self.fetch_entered.notify_one();
            self.fetch_release.notified().await;
        }

        let mut st = self.state.lock().await;
        if let Some(err) = st.fail_next_fetch.take() {
            return Err(err);
        }
        st.contents
            .get(&course_id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                status: 404,
                message: Some("Kurs bulunamadı".to_string()),
            })
    }

    async fn replace_content_order(
        &self,
        course_id: i64,
        request: &ReorderRequest,
    ) -> Result<(), ApiError> {
        let hold = {
            let mut st = self.state.lock().await;
            st.reorder_calls.push((course_id, request.clone()));
            st.hold_saves
        };

        if hold {
            self.save_entered.notify_one();
            self.save_release.notified().await;
        }

        let mut st = self.state.lock().await;
        if let Some(err) = st.fail_next_save.take() {
            return Err(err);
        }

        let Some(current) = st.contents.get(&course_id) else {
            return Err(ApiError::Rejected {
                status: 404,
                message: Some("Kurs bulunamadı".to_string()),
            });
        };

        let mut reordered = Vec::with_capacity(request.contents.len());
        for entry in &request.contents {
            let key = ContentRef {
                content_type: entry.content_type,
                content_id: entry.content_id,
            };
            let Some(item) = current.iter().find(|it| it.content_ref() == key) else {
                return Err(ApiError::Rejected {
                    status: 400,
                    message: Some(format!("İçerik bulunamadı: {key}")),
                });
            };
            reordered.push(item.clone().with_order(entry.order));
        }
        reordered.sort_by_key(|it| it.order);
        st.contents.insert(course_id, reordered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmd_schemas::ContentType;

    fn backend() -> FakeBackend {
        FakeBackend::with_courses([(course(7, "Kurgu"), abc_contents())])
    }

    #[tokio::test]
    async fn replace_rewrites_stored_order() {
        let b = backend();
        let mut items = b.fetch_contents(7).await.unwrap();
        items.swap(0, 1);
        let req = ReorderRequest {
            contents: items
                .iter()
                .enumerate()
                .map(|(i, it)| it.clone().with_order(i as u32 + 1).order_entry())
                .collect(),
        };
        b.replace_content_order(7, &req).await.unwrap();

        let stored = b.stored_order(7).await;
        assert_eq!(stored[0].content_type, ContentType::Quiz);
        assert_eq!(b.reorder_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn scripted_failure_is_one_shot() {
        let b = backend();
        b.fail_next_fetch(ApiError::Transport("down".into())).await;
        assert!(b.fetch_contents(7).await.is_err());
        assert!(b.fetch_contents(7).await.is_ok());
        assert_eq!(b.fetch_calls().await, vec![7, 7]);
    }

    #[tokio::test]
    async fn held_fetch_waits_for_release() {
        let b = backend();
        b.hold_fetches().await;
        let (items, ()) = tokio::join!(b.fetch_contents(7), async {
            b.wait_fetch_entered().await;
            assert_eq!(b.fetch_calls().await, vec![7]);
            b.release_fetch();
        });
        assert_eq!(items.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_course_is_404() {
        let err = backend().fetch_contents(99).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
    }
}
