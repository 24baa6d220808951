use vmd_schemas::{ContentItem, ContentRef, ReorderRequest};

use crate::{Direction, DiscardPolicy, OrderState, ReorderError, SwitchDecision};

fn renumber(items: &mut [ContentItem]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.order = (idx + 1) as u32;
    }
}

/// In-memory ordered sequence of one course's content items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentOrder {
    course_id: i64,
    items: Vec<ContentItem>,
    state: OrderState,
}

impl ContentOrder {
    /// Fresh sequence from a fetch. Positional order wins over whatever
    /// `order` values the server sent.
    pub fn load(course_id: i64, mut items: Vec<ContentItem>) -> Self {
        renumber(&mut items);
        Self {
            course_id,
            items,
            state: OrderState::Clean,
        }
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn position_of(&self, key: ContentRef) -> Option<usize> {
        self.items.iter().position(|it| it.content_ref() == key)
    }

    /// `order == index + 1` for every element.
    pub fn is_dense(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(idx, it)| it.order as usize == idx + 1)
    }

    fn check_index(&self, index: usize) -> Result<(), ReorderError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ReorderError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Drag/drop: remove the element at `source`, then insert it at the raw
    /// `target` index of the shortened list.
    ///
    /// Dragging downwards therefore lands the item *after* the previous
    /// occupant of `target`. Returns `Ok(false)` for the `source == target`
    /// no-op.
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<bool, ReorderError> {
        self.check_index(source)?;
        self.check_index(target)?;
        if source == target {
            return Ok(false);
        }

        let moved = self.items.remove(source);
        self.items.insert(target, moved);
        renumber(&mut self.items);
        self.state.bump();
        Ok(true)
    }

    /// Swap the element at `index` with its neighbour at `index + delta`.
    ///
    /// Only `delta` of -1 or +1 is honoured; boundary moves, out-of-range
    /// indices and any other delta are no-ops returning `false`.
    pub fn move_item(&mut self, index: usize, delta: isize) -> bool {
        if delta != -1 && delta != 1 {
            return false;
        }
        let Some(other) = index.checked_add_signed(delta) else {
            return false;
        };
        if index >= self.items.len() || other >= self.items.len() {
            return false;
        }

        self.items.swap(index, other);
        renumber(&mut self.items);
        self.state.bump();
        true
    }

    pub fn move_in(&mut self, index: usize, direction: Direction) -> bool {
        self.move_item(index, direction.delta())
    }

    /// Whether the up/down control for `index` should be enabled.
    pub fn can_move(&self, index: usize, direction: Direction) -> bool {
        index < self.items.len()
            && index
                .checked_add_signed(direction.delta())
                .is_some_and(|other| other < self.items.len())
    }

    /// Full-sequence body for the bulk replace call.
    pub fn save_payload(&self) -> ReorderRequest {
        ReorderRequest {
            contents: self
                .items
                .iter()
                .enumerate()
                .map(|(idx, it)| {
                    let mut entry = it.order_entry();
                    entry.order = (idx + 1) as u32;
                    entry
                })
                .collect(),
        }
    }

    /// Record a successful save of `sent`.
    ///
    /// Clears the dirty flag only when the local sequence still equals what
    /// was sent; mutations made while the request was in flight stay dirty.
    pub fn mark_saved(&mut self, sent: &ReorderRequest) -> bool {
        if self.save_payload() == *sent {
            self.state = OrderState::Clean;
            true
        } else {
            false
        }
    }

    /// Ask before leaving this course.
    pub fn request_switch(&self) -> SwitchDecision {
        match self.state {
            OrderState::Clean => SwitchDecision::Proceed,
            OrderState::Dirty { mutations } => SwitchDecision::ConfirmDiscard {
                course_id: self.course_id,
                mutations,
                pending: self.save_payload(),
            },
        }
    }

    /// Replace the whole sequence with a fresh fetch, honouring `policy` for
    /// unsaved work. Returns the discarded pending sequence, if any.
    pub fn switch_to(
        &mut self,
        course_id: i64,
        items: Vec<ContentItem>,
        policy: DiscardPolicy,
    ) -> Result<Option<ReorderRequest>, ReorderError> {
        if let (OrderState::Dirty { mutations }, DiscardPolicy::Refuse) = (&self.state, policy) {
            return Err(ReorderError::UnsavedChanges {
                course_id: self.course_id,
                mutations: *mutations,
            });
        }
        Ok(self.replace_from_fetch(course_id, items))
    }

    /// Explicit confirmation transition out of `Dirty`.
    pub fn discard_and_load(
        &mut self,
        course_id: i64,
        items: Vec<ContentItem>,
    ) -> Option<ReorderRequest> {
        self.replace_from_fetch(course_id, items)
    }

    /// Unconditional full replace: unsaved local reorders are dropped and the
    /// state resets to clean. Returns what was dropped.
    pub fn replace_from_fetch(
        &mut self,
        course_id: i64,
        items: Vec<ContentItem>,
    ) -> Option<ReorderRequest> {
        let discarded = self.is_dirty().then(|| self.save_payload());
        *self = ContentOrder::load(course_id, items);
        discarded
    }
}
