//! vmd-desk
//!
//! Content-order desk: one course's [`ContentOrder`] driven through a
//! [`ContentBackend`].
//!
//! - Course selection fetches the full list (no merge).
//! - Saves are full-sequence bulk replaces, guarded by an in-flight lock: a
//!   second save while one is pending is rejected and sends nothing.
//! - A failed save leaves the local list and its dirty state untouched, so a
//!   retry resends the identical sequence.

mod notice;

pub use notice::*;

use std::fmt;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use vmd_client::{
    ApiError, ContentBackend, FALLBACK_CONTENTS_LOAD, FALLBACK_COURSES_LOAD,
    FALLBACK_SAVE_FAILED,
};
use vmd_reconcile::{ContentOrder, Direction, DiscardPolicy, ReorderError};
use vmd_schemas::{ContentItem, Course, ReorderRequest};

pub const DEFAULT_SUCCESS_TTL: Duration = Duration::from_millis(3000);

/// What to do with unsaved work when another course is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchPolicy {
    /// Discard silently (legacy page behavior).
    Force,
    /// Refuse while dirty; the caller must save or re-select with `Force`.
    RequireConfirm,
}

impl SwitchPolicy {
    fn discard_policy(self) -> DiscardPolicy {
        match self {
            SwitchPolicy::Force => DiscardPolicy::Confirmed,
            SwitchPolicy::RequireConfirm => DiscardPolicy::Refuse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    NoCourseSelected,
    /// Another save for this desk has not resolved yet.
    SaveInFlight,
    UnsavedChanges { course_id: i64, mutations: u32 },
    Reorder(ReorderError),
    /// Backend failure. `message` is what the operator sees.
    Api { error: ApiError, message: String },
}

impl fmt::Display for DeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeskError::NoCourseSelected => write!(f, "no course selected"),
            DeskError::SaveInFlight => write!(f, "a save is already in progress"),
            DeskError::UnsavedChanges {
                course_id,
                mutations,
            } => write!(
                f,
                "course {course_id} has {mutations} unsaved change(s); save or force the switch"
            ),
            DeskError::Reorder(e) => write!(f, "{e}"),
            DeskError::Api { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DeskError {}

impl From<ReorderError> for DeskError {
    fn from(e: ReorderError) -> Self {
        match e {
            ReorderError::UnsavedChanges {
                course_id,
                mutations,
            } => DeskError::UnsavedChanges {
                course_id,
                mutations,
            },
            other => DeskError::Reorder(other),
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub course_id: i64,
    pub sent: ReorderRequest,
    /// False when the list was mutated while the request was in flight; the
    /// desk stays dirty in that case.
    pub now_clean: bool,
}

#[derive(Default)]
struct DeskState {
    courses: Vec<Course>,
    order: Option<ContentOrder>,
    error: Option<String>,
    notice: Option<Notice>,
}

impl DeskState {
    fn fail(&mut self, error: ApiError, fallback: &str) -> DeskError {
        let message = error.user_message(fallback);
        self.error = Some(message.clone());
        self.notice = Some(Notice::error(message.clone()));
        DeskError::Api { error, message }
    }

    /// A successful load or save supersedes the last failure. Success
    /// notices are left to expire on their own.
    fn clear_failure(&mut self) {
        self.error = None;
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Error)
        {
            self.notice = None;
        }
    }
}

pub struct ContentDesk<B> {
    backend: B,
    success_ttl: Duration,
    state: Mutex<DeskState>,
    save_lock: Mutex<()>,
}

impl<B: ContentBackend> ContentDesk<B> {
    pub fn new(backend: B) -> Self {
        Self::with_success_ttl(backend, DEFAULT_SUCCESS_TTL)
    }

    pub fn with_success_ttl(backend: B, success_ttl: Duration) -> Self {
        Self {
            backend,
            success_ttl,
            state: Mutex::new(DeskState::default()),
            save_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch the course selector. When nothing is selected yet the first
    /// course is selected and its contents loaded.
    ///
    /// Only a failed list fetch is an error. If the automatic selection
    /// fails the list is still returned; the failure is recorded in
    /// [`Self::last_error`] and the error notice.
    pub async fn load_courses(&self) -> Result<Vec<Course>, DeskError> {
        let courses = match self.backend.list_courses().await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "course list failed");
                return Err(self.state.lock().await.fail(e, FALLBACK_COURSES_LOAD));
            }
        };

        let auto_select = {
            let mut st = self.state.lock().await;
            st.courses = courses.clone();
            st.clear_failure();
            match (&st.order, courses.first()) {
                (None, Some(first)) => Some(first.id),
                _ => None,
            }
        };

        if let Some(course_id) = auto_select {
            debug!(course_id, "auto-selecting first course");
            if let Err(e) = self.select_course(course_id, SwitchPolicy::Force).await {
                warn!(course_id, error = %e, "auto-select failed; course list kept");
            }
        }
        Ok(courses)
    }

    /// Load `course_id`, replacing the current list. Returns the unsaved
    /// sequence that was discarded, if any.
    pub async fn select_course(
        &self,
        course_id: i64,
        policy: SwitchPolicy,
    ) -> Result<Option<ReorderRequest>, DeskError> {
        // Refuse before any request goes out.
        if policy == SwitchPolicy::RequireConfirm {
            let st = self.state.lock().await;
            if let Some(order) = st.order.as_ref() {
                if let vmd_reconcile::OrderState::Dirty { mutations } = order.state() {
                    return Err(DeskError::UnsavedChanges {
                        course_id: order.course_id(),
                        mutations: *mutations,
                    });
                }
            }
        }

        let items = match self.backend.fetch_contents(course_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(course_id, error = %e, "content fetch failed");
                return Err(self.state.lock().await.fail(e, FALLBACK_CONTENTS_LOAD));
            }
        };

        let mut st = self.state.lock().await;
        // Re-checked under the lock: the list may have changed during the fetch.
        let discarded = match st.order.as_mut() {
            Some(order) => order.switch_to(course_id, items, policy.discard_policy())?,
            None => {
                st.order = Some(ContentOrder::load(course_id, items));
                None
            }
        };
        st.clear_failure();

        match &discarded {
            Some(lost) => warn!(
                course_id,
                discarded_items = lost.contents.len(),
                "course switch discarded unsaved order"
            ),
            None => info!(course_id, "course loaded"),
        }
        Ok(discarded)
    }

    /// Drag/drop. See [`ContentOrder::reorder`] for the landing position.
    pub async fn reorder(&self, source: usize, target: usize) -> Result<bool, DeskError> {
        let mut st = self.state.lock().await;
        let order = st.order.as_mut().ok_or(DeskError::NoCourseSelected)?;
        Ok(order.reorder(source, target)?)
    }

    /// Up/down button. Boundary moves are no-ops returning `false`.
    pub async fn move_item(&self, index: usize, direction: Direction) -> Result<bool, DeskError> {
        let mut st = self.state.lock().await;
        let order = st.order.as_mut().ok_or(DeskError::NoCourseSelected)?;
        Ok(order.move_in(index, direction))
    }

    /// Send the full current sequence as a bulk replace.
    ///
    /// Safe to call when clean. Rejected with [`DeskError::SaveInFlight`]
    /// while another save is pending.
    pub async fn save(&self) -> Result<SaveOutcome, DeskError> {
        let Ok(_in_flight) = self.save_lock.try_lock() else {
            warn!("save rejected: previous save still in flight");
            return Err(DeskError::SaveInFlight);
        };

        let (course_id, sent) = {
            let st = self.state.lock().await;
            let order = st.order.as_ref().ok_or(DeskError::NoCourseSelected)?;
            (order.course_id(), order.save_payload())
        };

        let result = self.backend.replace_content_order(course_id, &sent).await;

        let mut st = self.state.lock().await;
        match result {
            Ok(()) => {
                let now_clean = match st.order.as_mut() {
                    Some(order) if order.course_id() == course_id => order.mark_saved(&sent),
                    _ => false,
                };
                st.clear_failure();
                st.notice = Some(Notice::success(
                    SAVE_SUCCESS_MESSAGE,
                    self.success_ttl,
                    Instant::now(),
                ));
                info!(
                    course_id,
                    items = sent.contents.len(),
                    now_clean,
                    "content order saved"
                );
                Ok(SaveOutcome {
                    course_id,
                    sent,
                    now_clean,
                })
            }
            Err(e) => {
                warn!(course_id, error = %e, "content order save failed");
                Err(st.fail(e, FALLBACK_SAVE_FAILED))
            }
        }
    }

    pub async fn courses(&self) -> Vec<Course> {
        self.state.lock().await.courses.clone()
    }

    pub async fn selected_course(&self) -> Option<i64> {
        self.state.lock().await.order.as_ref().map(|o| o.course_id())
    }

    pub async fn items(&self) -> Vec<ContentItem> {
        self.state
            .lock()
            .await
            .order
            .as_ref()
            .map(|o| o.items().to_vec())
            .unwrap_or_default()
    }

    pub async fn is_dirty(&self) -> bool {
        self.state
            .lock()
            .await
            .order
            .as_ref()
            .is_some_and(|o| o.is_dirty())
    }

    pub async fn save_payload(&self) -> Option<ReorderRequest> {
        self.state
            .lock()
            .await
            .order
            .as_ref()
            .map(|o| o.save_payload())
    }

    /// Operator-facing message of the last failure, until the next success.
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn current_notice(&self) -> Option<Notice> {
        self.current_notice_at(Instant::now()).await
    }

    /// Expired notices are dropped on read.
    pub async fn current_notice_at(&self, now: Instant) -> Option<Notice> {
        let mut st = self.state.lock().await;
        if st.notice.as_ref().is_some_and(|n| !n.is_visible_at(now)) {
            st.notice = None;
        }
        st.notice.clone()
    }
}
