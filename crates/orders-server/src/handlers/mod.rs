//! HTTP handler modules.
//!
//! Handlers are thin: they validate the request, delegate to
//! [`crate::service::EntityService`] or [`crate::proxy::KeywordProxy`], and
//! return the result. No business logic lives here.

pub mod docs;
pub mod entities;
pub mod say;
