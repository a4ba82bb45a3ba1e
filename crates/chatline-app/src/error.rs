//! Runtime error types.

use chatline_client::ClientError;
use thiserror::Error;

/// Fatal runtime failure. The connection has already been stopped when this
/// is returned.
#[derive(Error, Debug)]
pub enum RuntimeError<E> {
    /// Driver I/O failed: the readiness wait, a write, a read or a closed
    /// peer.
    #[error("driver error: {0}")]
    Driver(#[source] E),

    /// Client state machine could not continue.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}
