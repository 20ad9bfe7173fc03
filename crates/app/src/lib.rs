//! # accounts-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that persistence adapters must implement
//!   (driven/outbound port):
//!   - `AccountRepository` — create, find, list, update, delete accounts
//! - Define the **driving/inbound** use-case struct:
//!   - `AccountService` — create, get, list, update, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `accounts-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
