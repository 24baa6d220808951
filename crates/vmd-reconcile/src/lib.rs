//! vmd-reconcile
//!
//! Ordered-list reconciler for a course's content sequence.
//!
//! - The fetched sequence is authoritative; `order` is renumbered to `index + 1`
//! - Every mutation rewrites the whole sequence's `order` fields
//! - Drag/drop is remove-then-insert at the raw target index
//! - Up/down is a positional swap with the neighbour
//! - Persistence is a full-sequence bulk replace, never a diff
//! - Discarding unsaved work requires an explicit policy
//!
//! Deterministic, pure logic. No IO. No backend calls.

mod engine;
mod types;

pub use engine::ContentOrder;
pub use types::*;
