//! Client events and actions.

use std::{fmt, process::ExitCode};

use bytes::Bytes;

use crate::Rejection;

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Reading operator lines and connection payloads
/// - Performing the blocking reply read when asked via
///   [`ClientAction::AwaitReply`]
/// - Reporting that local input has closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Operator entered a line (trailing newline included if typed).
    LineEntered(String),

    /// Operator entered bytes that are not valid UTF-8.
    UndecodableLine {
        /// Length of the line in bytes
        len: usize,
    },

    /// Payload read in response to [`ClientAction::AwaitReply`].
    ReplyReceived(Bytes),

    /// Payload the peer pushed outside any request/reply window.
    BroadcastReceived(Bytes),

    /// Local input reached end of file.
    InputClosed,
}

/// Actions the client produces for the caller to execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Write these bytes to the connection.
    Transmit(Bytes),

    /// Perform one blocking read and feed it back as
    /// [`ClientEvent::ReplyReceived`] before waiting on anything else.
    AwaitReply,

    /// Show peer text to the operator verbatim.
    Display(String),

    /// Show a local validation diagnostic. Nothing was transmitted.
    Reject(Rejection),

    /// End the session. The caller releases the connection and exits.
    Terminate(SessionEnd),
}

/// Why a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Peer confirmed the logout.
    LoggedOut,
    /// Peer sent the capacity-exceeded notice.
    ServerFull,
    /// Local input closed.
    InputClosed,
}

impl SessionEnd {
    /// Process exit status. Every graceful end is a success.
    pub fn exit_code(self) -> ExitCode {
        ExitCode::SUCCESS
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => f.write_str("logged out"),
            Self::ServerFull => f.write_str("server refused service"),
            Self::InputClosed => f.write_str("local input closed"),
        }
    }
}
