//! Chatline wire protocol.
//!
//! The protocol carries human-readable ASCII lines over a byte stream. There is
//! no framing beyond "one send is one logical unit": commands are transmitted
//! verbatim as the operator typed them, and replies are free text meant for
//! display.
//!
//! # Components
//!
//! - [`Keyword`]: the case-sensitive command vocabulary
//! - [`line`]: the fixed line capacity and the verbatim codec
//! - [`reply`]: the leading-character convention that classifies replies
//! - [`ProtocolError`]: codec failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod keyword;
pub mod line;
pub mod reply;

pub use errors::{ProtocolError, Result};
pub use keyword::Keyword;
pub use line::{MAX_LINE, decode_text, encode_line};
pub use reply::{Expectation, ReplyKind, interpret, is_capacity_notice};

/// Shortest accepted user identifier, in bytes.
pub const MIN_USER_ID_LEN: usize = 3;

/// Longest accepted user identifier, in bytes.
pub const MAX_USER_ID_LEN: usize = 32;

/// Shortest accepted password, in bytes.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_LEN: usize = 32;

/// Longest message body the line capacity is sized for, in bytes.
pub const MAX_MESSAGE_LEN: usize = 256;

/// Recipient that addresses every logged-in user. Never a valid user ID.
pub const BROADCAST_RECIPIENT: &str = "all";
