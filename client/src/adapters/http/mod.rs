//! HTTP adapter
//!
//! JSON-over-HTTP implementation of the forum API port.

pub mod client;

pub use client::HttpForumApi;
