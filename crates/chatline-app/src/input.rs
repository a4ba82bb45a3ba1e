//! Input readiness.

use bytes::Bytes;

/// One unit of readiness returned by [`Driver::next_input`](crate::Driver::next_input).
///
/// Exactly one source is serviced per loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Operator entered a line. Carries the text as typed, including the
    /// trailing newline when present.
    Line(String),

    /// Operator entered a line that is not valid UTF-8.
    Undecodable {
        /// Length of the line in bytes
        len: usize,
    },

    /// Peer sent text outside of a request/reply exchange.
    Broadcast(Bytes),

    /// Local input reached end of file.
    LocalClosed,
}
