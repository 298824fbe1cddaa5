//! Thought journal: one free-text note persisted under a fixed key.
//!
//! `JournalStore` holds the working text and the notice board; the `Confirm`
//! and `Printer` ports are supplied by the caller for `clear` and `print`.

pub mod export;
pub mod ports;
pub mod store;
