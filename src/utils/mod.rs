//! Utility modules for the content indexer.

pub mod date;
pub mod log;
