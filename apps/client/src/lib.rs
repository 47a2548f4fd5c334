//! Client tier for the Catalyst career-guidance app.
//!
//! The heart of this crate is [`session::Session`]: an explicit,
//! constructor-injected state object that mediates between the REST backend,
//! the generative-AI gateway, and locally persisted state. Every server
//! synchronization is a command returning a `Result`; local state commits
//! only after the remote call succeeds.

pub mod api;
pub mod blend;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod models;
pub mod probes;
pub mod session;
pub mod store;
