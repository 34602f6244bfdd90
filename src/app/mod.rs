//! Application composition.
//!
//! - `shell`: session state and page actions, no egui
//! - `core`: `ShellApp` construction (storage, store, host thread, handshake)
//! - `events`: menu commands and page events
//! - `update`: the per-frame loop

pub mod core;
pub mod events;
pub mod shell;
pub mod update;

pub use core::ShellApp;
pub use shell::Shell;
