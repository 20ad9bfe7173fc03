//! # accounts-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** for the account resource
//!   (`/accounts`, `/accounts/{account_id}`) plus `/health` and `/`
//! - Enforce the request `Content-Type` before any handler work
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `accounts-app` (for port traits and services) and
//! `accounts-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod content_type;
pub mod error;
pub mod router;
pub mod state;
