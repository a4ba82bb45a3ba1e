//! Protocol error types.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding protocol lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Line exceeds the fixed line capacity.
    ///
    /// On the outbound side the line is rejected before anything is written.
    /// On the inbound side the peer overflowed the buffer, which is fatal for
    /// the connection.
    #[error("line of {len} bytes exceeds the {max}-byte line capacity")]
    LineTooLong {
        /// Length of the offending line
        len: usize,
        /// Line capacity
        max: usize,
    },

    /// Received an empty payload where text was expected.
    #[error("empty payload")]
    EmptyPayload,
}
