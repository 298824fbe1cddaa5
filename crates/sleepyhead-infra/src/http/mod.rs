//! HTTP adapters for the remote chat service.

pub mod client;

pub use client::HttpChatBackend;
