//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`chatline_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Operator lines, unsolicited peer text and disconnects are scripted in
//! order. When a [`SimPeer`] is attached, transmitted lines are fed to it and
//! its replies and pushes are queued automatically; otherwise replies are
//! scripted by hand.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use bytes::Bytes;
use chatline_app::{Driver, Input};
use thiserror::Error;

use crate::SimPeer;

/// Error type for simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// Scripted connection loss.
    #[error("connection closed by peer")]
    Disconnected,

    /// A reply was awaited but none was queued.
    #[error("no reply queued")]
    NoReply,
}

/// One scripted unit of readiness.
#[derive(Debug)]
enum Scripted {
    Line(String),
    Broadcast(Bytes),
    Disconnect,
}

/// Shared state for input injection and output capture.
#[derive(Default)]
struct SharedState {
    script: VecDeque<Scripted>,
    /// Peer text pushed in response to transmitted lines. Delivered before
    /// the next scripted unit.
    pushes: VecDeque<Bytes>,
    replies: VecDeque<Bytes>,
    sent: Vec<Bytes>,
    displayed: Vec<String>,
    peer: Option<SimPeer>,
    disconnected: bool,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state, so a test can keep a handle for assertions after the
/// runtime takes ownership of the driver.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a new simulation driver with no peer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver connected to a simulated peer.
    ///
    /// The peer's greeting, if any, is the first input delivered.
    pub fn with_peer(peer: SimPeer) -> Self {
        let driver = Self::new();
        {
            let mut state = driver.lock();
            if let Some(greeting) = peer.greeting() {
                state.pushes.push_back(greeting);
            }
            state.peer = Some(peer);
        }
        driver
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an operator line. A trailing newline is appended if missing.
    pub fn type_line(&self, line: &str) {
        let mut line = line.to_string();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.lock().script.push_back(Scripted::Line(line));
    }

    /// Queue unsolicited text from the peer.
    pub fn inject_broadcast(&self, payload: impl Into<Bytes>) {
        self.lock().script.push_back(Scripted::Broadcast(payload.into()));
    }

    /// Queue a connection loss.
    pub fn inject_disconnect(&self) {
        self.lock().script.push_back(Scripted::Disconnect);
    }

    /// Queue a reply for the next synchronous read.
    pub fn inject_reply(&self, payload: impl Into<Bytes>) {
        self.lock().replies.push_back(payload.into());
    }

    /// Lines transmitted so far.
    pub fn sent(&self) -> Vec<Bytes> {
        self.lock().sent.clone()
    }

    /// Text shown to the operator so far.
    pub fn displayed(&self) -> Vec<String> {
        self.lock().displayed.clone()
    }

    /// Whether the runtime released the connection.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Whether scripted input remains unconsumed.
    pub fn has_pending(&self) -> bool {
        let state = self.lock();
        !state.script.is_empty() || !state.pushes.is_empty()
    }

    /// Snapshot of the attached peer.
    pub fn peer(&self) -> Option<SimPeer> {
        self.lock().peer.clone()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn next_input(&mut self) -> Result<Input, Self::Error> {
        let mut state = self.lock();

        if let Some(push) = state.pushes.pop_front() {
            return Ok(Input::Broadcast(push));
        }

        match state.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(Input::Line(line)),
            Some(Scripted::Broadcast(payload)) => Ok(Input::Broadcast(payload)),
            Some(Scripted::Disconnect) => {
                state.disconnected = true;
                Err(SimDriverError::Disconnected)
            },
            None => Ok(Input::LocalClosed),
        }
    }

    async fn send_line(&mut self, line: Bytes) -> Result<(), Self::Error> {
        let mut guard = self.lock();
        let state = &mut *guard;
        if state.disconnected {
            return Err(SimDriverError::Disconnected);
        }

        if let Some(peer) = state.peer.as_mut() {
            let response = peer.handle_line(&line);
            state.replies.extend(response.reply);
            state.pushes.extend(response.pushes);
        }

        state.sent.push(line);
        Ok(())
    }

    async fn recv_reply(&mut self) -> Result<Bytes, Self::Error> {
        let mut state = self.lock();
        if state.disconnected {
            return Err(SimDriverError::Disconnected);
        }
        state.replies.pop_front().ok_or(SimDriverError::NoReply)
    }

    fn display(&mut self, text: &str) -> Result<(), Self::Error> {
        self.lock().displayed.push(text.to_string());
        Ok(())
    }

    async fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
