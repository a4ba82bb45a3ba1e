//! Client
//!
//! Action-based client state machine for the chatline protocol. Parses and
//! validates operator lines, tracks the authentication state, and interprets
//! the peer's replies.
//!
//! # Architecture
//!
//! The client is Sans-IO. It receives events ([`ClientEvent`]), processes them
//! through pure state machine logic, and returns actions ([`ClientAction`]) for
//! the caller to execute. Nothing in this crate reads stdin or touches a
//! socket unless the `transport` feature is enabled.
//!
//! # Components
//!
//! - [`Client`]: Top-level state machine owning the [`Session`]
//! - [`Command`]: One tokenized operator line
//! - [`validate`]: Local validation of a [`Command`] into a [`Request`]
//! - [`Rejection`]: Operator-facing validation diagnostics
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::Connection`]: Owned byte-stream handle with capacity guards
//! - [`transport::connect`]: Resolve and connect to a server

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod command;
mod error;
mod event;
mod session;
mod validator;

#[cfg(feature = "transport")]
pub mod transport;

pub use chatline_proto::{Expectation, Keyword, ReplyKind};
pub use client::Client;
pub use command::Command;
pub use error::{ClientError, Rejection};
pub use event::{ClientAction, ClientEvent, SessionEnd};
pub use session::{Session, SessionState};
pub use validator::{Password, Recipient, Request, UserId, validate};
