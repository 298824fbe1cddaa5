//! Business logic and port trait definitions for SleepyHead.
//!
//! This crate defines the "ports" (`ChatBackend`, `KvStore`, `Printer`,
//! `Confirm`) that the infrastructure and CLI layers implement, plus the
//! logic that runs on top of them: the chat session controller, the thought
//! journal, transient notices, and the mood log. It depends only on
//! `sleepyhead-types` -- never on `sleepyhead-infra` or any IO crate.

pub mod chat;
pub mod journal;
pub mod mood;
pub mod notice;
pub mod storage;
