//! Interactive chat with SleepyHead.
//!
//! Readline input, slash commands, markdown rendering of replies with a
//! sentiment footer, and an in-memory mood tracker. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
