//! Fusen — a headless bookmark manager client.
//!
//! The list view, the create/edit forms and the presentation controller are
//! plain view-models driven by intents; a shell (the console demo, or any UI
//! speaking the JSON-RPC protocol) renders them. This library crate exposes
//! all modules for use by the binaries and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod telemetry;
pub mod types;
