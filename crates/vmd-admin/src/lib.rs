//! vmd-admin
//!
//! Pure derivations behind the admin screens other than content ordering:
//! abandoned-cart recovery stages, review moderation filters, email template
//! previews.
//!
//! All logic is deterministic. Callers pass `now` explicitly; nothing here
//! reads a clock or talks to the backend.

pub mod cart;
pub mod reviews;
pub mod templates;
