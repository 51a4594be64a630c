//! Library crate for user-cards.
//!
//! This crate exposes the building blocks of the TUI:
//! - HTTP client and user record types (`api`)
//! - Application state, load state machine and event loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - Static HTML export (`export`)
//! - Name/email filtering (`search`)
//! - Terminal rendering (`ui`)
//! - Card fragments and the element builder (`view`)
//!
//! It is used by the `user-cards` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod search;
pub mod ui;
pub mod view;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
