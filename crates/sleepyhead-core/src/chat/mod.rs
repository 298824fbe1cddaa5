//! Chat session abstractions for SleepyHead.
//!
//! `ChatBackend` is the port to the remote chat service; `ChatSessionController`
//! owns the conversation and the Idle/Awaiting state machine around it.

pub mod backend;
pub mod controller;
