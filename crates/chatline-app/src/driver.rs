//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the session coordinator from specific I/O
//! implementations. The terminal binary implements it over stdin and a TCP
//! connection, the simulation harness over in-memory queues, while the
//! generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use bytes::Bytes;

use crate::Input;

/// Abstracts I/O operations for the session coordinator.
///
/// # Implementations
///
/// - **Terminal**: tokio stdin lines and a TCP connection
/// - **Simulation**: scripted operator input and an in-memory peer
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait, without timeout, until either local input or the connection is
    /// ready and return exactly one unit from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait fails or the connection was closed.
    fn next_input(&mut self) -> impl Future<Output = Result<Input, Self::Error>> + Send;

    /// Send one encoded line to the peer.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is closed or the write fails.
    fn send_line(&mut self, line: Bytes) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Block for the reply to the command just sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is closed, the read fails or a
    /// configured reply timeout elapses.
    fn recv_reply(&mut self) -> impl Future<Output = Result<Bytes, Self::Error>> + Send;

    /// Show text to the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn display(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Release the connection. Called exactly once, on every exit path.
    fn stop(&mut self) -> impl Future<Output = ()> + Send;
}
