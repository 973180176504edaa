//! # Networdle
//!
//! A turn-based word guessing game played over a line-oriented byte
//! stream. A client connects, sends `START GAME`, and guesses a hidden
//! word; the server answers each guess with a hint until the word is found.
//!
//! This crate ties the layers together: [`NetwordleServer`] accepts TCP
//! connections and runs one session per client, and [`GameClient`] plays
//! the other side.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use networdle::prelude::*;
//!
//! # async fn serve() -> Result<(), NetwordleError> {
//! let server = NetwordleServer::builder()
//!     .bind("0.0.0.0:4000")
//!     .word_bank(WordBank::new(["CRANE", "SLATE"], ["APPLE"])?)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod client;
mod config;
mod error;
mod server;

pub use client::{ClientState, DEFAULT_REPLY_TIMEOUT, GameClient, Reply};
pub use config::ServerConfig;
pub use error::NetwordleError;
pub use server::{NetwordleServer, NetwordleServerBuilder};

/// Re-exports everything needed to run a server or play a game.
pub mod prelude {
    pub use crate::{
        ClientState, GameClient, NetwordleError, NetwordleServer,
        NetwordleServerBuilder, Reply, ServerConfig,
    };
    pub use networdle_game::{
        Game, GameError, GuessList, GuessOutcome, LetterHint, TargetWord,
        WordBank,
    };
    pub use networdle_protocol::{ControlCatalog, ProtocolError};
    pub use networdle_session::{Session, SessionConfig, SessionError};
    pub use networdle_transport::{
        Connection, ConnectionId, TcpConnection, TcpTransport, Transport,
        TransportError,
    };
}
