//! Storage abstractions for SleepyHead.
//!
//! Defines the local key-value store trait. Implementations live in
//! sleepyhead-infra.

pub mod kv_store;
