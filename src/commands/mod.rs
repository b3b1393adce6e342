//! Command implementations for recap

pub mod auto;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod run;
