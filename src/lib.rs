//! Typing session engine and persisted progress ledger.
//!
//! The library carries everything the integration tests and the binary
//! share; terminal-only modules (app, event, ui) are declared in main.rs.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
pub mod store;
