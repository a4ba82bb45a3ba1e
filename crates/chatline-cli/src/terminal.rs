//! Terminal driver for the client.
//!
//! Implements the [`Driver`] trait over tokio stdin and a TCP
//! [`Connection`]. Operator output goes to stdout; logs go to stderr.

use std::io::{self, Write};

use bytes::Bytes;
use chatline_app::{Driver, Input};
use chatline_client::transport::{Connection, TransportError};
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader, Stdin},
    net::TcpStream,
};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from stdin or stdout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Generic over the input, output and stream so tests can run it over
/// in-memory pipes; [`TerminalDriver::new`] wires the real stdin and stdout.
pub struct TerminalDriver<R = Stdin, W = io::Stdout, S = TcpStream> {
    input: BufReader<R>,
    /// Bytes of the line being read, kept across cancelled reads.
    pending_line: Vec<u8>,
    output: W,
    connection: Connection<S>,
}

impl TerminalDriver {
    /// Create a driver over the process stdin and stdout.
    pub fn new(connection: Connection) -> Self {
        Self::with_io(tokio::io::stdin(), io::stdout(), connection)
    }
}

impl<R, W, S> TerminalDriver<R, W, S>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Create a driver over explicit input and output.
    pub fn with_io(input: R, output: W, connection: Connection<S>) -> Self {
        Self { input: BufReader::new(input), pending_line: Vec::new(), output, connection }
    }

    /// Hand out the buffered line exactly as typed, delimiter included.
    fn take_line(&mut self) -> Input {
        if self.pending_line.is_empty() {
            return Input::LocalClosed;
        }

        match String::from_utf8(std::mem::take(&mut self.pending_line)) {
            Ok(line) => Input::Line(line),
            Err(e) => {
                let len = e.as_bytes().len();
                tracing::debug!(len, "operator line is not UTF-8");
                Input::Undecodable { len }
            },
        }
    }

    /// Operator output sink.
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R, W, S> Driver for TerminalDriver<R, W, S>
where
    R: AsyncRead + Unpin + Send,
    W: Write + Send,
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    type Error = TerminalError;

    async fn next_input(&mut self) -> Result<Input, Self::Error> {
        // Both branches are cancel-safe: `read_until` appends partial input to
        // `pending_line` and `recv_text` is a single read.
        tokio::select! {
            read = self.input.read_until(b'\n', &mut self.pending_line) => {
                read?;
                Ok(self.take_line())
            },
            text = self.connection.recv_text() => Ok(Input::Broadcast(text?)),
        }
    }

    async fn send_line(&mut self, line: Bytes) -> Result<(), Self::Error> {
        Ok(self.connection.send_line(&line).await?)
    }

    async fn recv_reply(&mut self) -> Result<Bytes, Self::Error> {
        Ok(self.connection.recv_reply().await?)
    }

    fn display(&mut self, text: &str) -> Result<(), Self::Error> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    async fn stop(&mut self) {
        if let Err(e) = self.connection.shutdown().await {
            tracing::debug!(error = %e, "connection shutdown failed");
        }
    }
}
