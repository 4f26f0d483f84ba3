//! # Registry Runtime
//!
//! Host process for the registry engine.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `PR_*` environment overrides)
//! 2. Reopen persisted state from the data directory
//! 3. Process one JSON command per stdin line, answering on stdout
//!
//! Commands are handled strictly in arrival order; the runtime is the single
//! writer the engine requires.

pub mod adapters;
pub mod commands;
pub mod config;

pub use commands::{handle_line, run, Command, Response};
pub use config::{ConfigError, RuntimeConfig, StorageConfig};
