///! Shared utilities
pub mod debug_log;
pub mod error;
pub mod format;
