//! Wire protocol for Networdle.
//!
//! This crate defines the "language" that clients and servers speak:
//!
//! - **Codec** ([`encode`], [`decode`], [`is_valid_frame`]): how a text
//!   message becomes a newline-terminated ASCII line and back.
//! - **Control messages** ([`ControlCatalog`], [`ControlMessageKind`]):
//!   the reserved lines (`START GAME`, `INVALID GUESS`, `GAME OVER`, the
//!   placeholder start response) and the exact-match classifier.
//! - **Errors** ([`ProtocolError`]): what can go wrong while framing.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw lines) and session (game
//! progression). It doesn't know about sockets or words; it only knows
//! which lines are well formed and which ones are reserved.
//!
//! ```text
//! Transport (bytes) → Protocol (text / control kind) → Session (state machine)
//! ```

mod codec;
mod control;
mod error;

pub use codec::{decode, encode, is_valid_frame, validate, LINE_FEED};
pub use control::{
    is_placeholder, placeholder, ControlCatalog, ControlMessageKind,
    DEFAULT_WORD_LENGTH, END_GAME, INVALID_GUESS, PLACEHOLDER, START_GAME,
};
pub use error::ProtocolError;
