//! Session management for Networdle.
//!
//! This crate runs one game over one connection:
//!
//! 1. **Lifecycle**: [`ManagedConnection`] frames outgoing messages,
//!    bounds every receive with a deadline, and closes the stream exactly
//!    once however the session ends
//! 2. **State machine**: [`Session`] moves from `AwaitingStart` through
//!    `Playing` to `Finished`, answering each guess
//!
//! # How it fits in the stack
//!
//! ```text
//! Server (above)  ← accepts connections, spawns one Session per client
//!     ↕
//! Session Layer (this crate)  ← drives the game protocol for one client
//!     ↕
//! Protocol + Game (below)  ← framing, control messages, hints, scoring
//! ```

mod config;
mod connection;
mod error;
mod session;

pub use config::SessionConfig;
pub use connection::ManagedConnection;
pub use error::SessionError;
pub use session::{Session, SessionState};
