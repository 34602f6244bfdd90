//! duet-shell library.
//!
//! Two halves joined by one named channel: the egui UI on the main thread and
//! the host, which owns the menu and runs on its own thread with a Tokio
//! runtime. This module re-exports the pieces for the binary and for tests.

pub mod app;
pub mod config;
pub mod error;
pub mod fonts;
pub mod host;
pub mod i18n;
pub mod ipc;
pub mod logging;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
