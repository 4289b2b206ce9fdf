//! Term Filter - Elm-style term editor for filter expressions
//!
//! This crate provides the core types and logic for editing a filter
//! expression as a flat sequence of typed terms (`host = web & ...`),
//! implementing the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod filter;
pub mod grammar;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod suggestions;
pub mod surface;
pub mod tracing;
pub mod transcode;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use filter::Filter;
pub use messages::Msg;
pub use model::{FilterModel, Term, TermType};
pub use runtime::Runtime;
pub use surface::{MemorySurface, Surface};
