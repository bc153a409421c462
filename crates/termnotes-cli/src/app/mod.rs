//! Application-level utilities for the termnotes CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config, store and key files

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
