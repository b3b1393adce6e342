//! Recap Core Library
//!
//! Groups dated notes into weekly and monthly digests, strips daily
//! boilerplate, and optionally summarizes digests through a chat completions
//! endpoint.

pub mod clean;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod notify;
pub mod period;
pub mod recap;
pub mod store;
pub mod summary;
