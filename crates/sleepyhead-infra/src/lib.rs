//! Infrastructure layer for SleepyHead.
//!
//! Contains implementations of the ports defined in `sleepyhead-core`:
//! the reqwest-based chat service client, SQLite key-value storage, the
//! command-line print adapter, and the `config.toml` loader.

pub mod config;
pub mod http;
pub mod printer;
pub mod sqlite;
