//! API schema types for request/response definitions.

pub mod say;
pub mod validation;
