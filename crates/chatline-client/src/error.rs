//! Client error types.
//!
//! Two layers: [`Rejection`] is an operator mistake caught locally before
//! anything is transmitted and is always recoverable. [`ClientError`] means
//! the state machine cannot continue and the caller must tear down the
//! session.

use chatline_proto::{Keyword, ProtocolError};
use thiserror::Error;

/// Local validation failure. Display text is the operator diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Command requires a confirmed login.
    #[error("Denied. Please login first.")]
    NotLoggedIn,

    /// `login`/`newuser` while already logged in.
    #[error("Denied. User already logged in.")]
    AlreadyLoggedIn,

    /// Missing or extra argument tokens.
    #[error("Correct usage: {}", .0.usage())]
    Usage(Keyword),

    /// User ID outside 3..=32 bytes.
    #[error("userID should be between 3 and 32 characters long.")]
    UserIdLength {
        /// Offending length
        len: usize,
    },

    /// Password outside 3..=32 bytes.
    #[error("password should be between 3 and 32 characters long.")]
    PasswordLength {
        /// Offending length
        len: usize,
    },

    /// User ID equal to the broadcast recipient.
    #[error("userID cannot be \"all\".")]
    ReservedUserId,

    /// `send` recipient outside 3..=32 bytes.
    #[error("UserIDs are between 3 and 32 characters long.")]
    RecipientLength {
        /// Offending length
        len: usize,
    },

    /// `send` without a message token.
    #[error("Message must be between length 1 and 256 characters.")]
    EmptyMessage,

    /// Line longer than the line capacity.
    #[error("Input of {len} bytes exceeds the {max}-byte line limit.")]
    LineTooLong {
        /// Line length
        len: usize,
        /// Line capacity
        max: usize,
    },

    /// Unknown command keyword.
    #[error(
        "Invalid command. List of commands are \"login\", \"newuser\", \"send\", \"who\", and \"logout\""
    )]
    InvalidCommand {
        /// Leading token that was not a keyword
        keyword: String,
    },

    /// Line is not valid UTF-8 text.
    #[error("Input must be valid UTF-8 text.")]
    InvalidEncoding {
        /// Line length
        len: usize,
    },
}

/// Fatal client state machine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Peer payload violated the codec.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Reply delivered while no request was outstanding.
    #[error("reply received with no request outstanding")]
    UnexpectedReply,

    /// Operator line delivered while a reply is still outstanding.
    #[error("request issued while a reply to {pending:?} is outstanding")]
    ReplyPending {
        /// Reply still being waited for
        pending: chatline_proto::Expectation,
    },
}
