//! Cascade: account registration, login and a filterable audit log.
//!
//! The core (`core`) validates requests, owns the account store and the
//! append-only event log, and answers every operation with a status and a
//! JSON body. `http` is the axum transport over it; `cli` is the binary's
//! entry point.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod http;
