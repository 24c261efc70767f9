//! HTTP/JSON API over the agents, customers, and orders relations.
//!
//! Every entity route maps one HTTP verb to one parameterized statement (two
//! sequential ones for upsert) and maps the affected-row count back to a
//! status code. This crate contains the configuration, request validation,
//! the entity service, the keyword proxy, error handling, and the router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod proxy;
pub mod resource;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
pub mod validate;
