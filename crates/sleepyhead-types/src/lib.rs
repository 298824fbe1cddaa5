//! Shared domain types for SleepyHead.
//!
//! This crate contains the domain types used across the SleepyHead workspace:
//! chat messages, sentiment results, the chat service wire format, journal
//! notices, mood entries, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod mood;
pub mod notice;
