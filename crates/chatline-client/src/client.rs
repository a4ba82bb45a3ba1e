//! Client state machine.
//!
//! The `Client` owns the [`Session`] and the single outstanding reply
//! expectation. Requests and replies strictly alternate: after a synchronous
//! command is transmitted the caller must deliver exactly one reply before the
//! next operator line.

use bytes::Bytes;
use chatline_proto::{
    Expectation, MAX_LINE, ReplyKind, decode_text, encode_line, interpret, is_capacity_notice,
};

use crate::{
    Command, Rejection, Session,
    error::ClientError,
    event::{ClientAction, ClientEvent, SessionEnd},
    validator,
};

/// Client for a chatline server.
#[derive(Debug, Clone, Default)]
pub struct Client {
    /// Authentication state, mutated only after interpreting a reply.
    session: Session,

    /// Reply expected after the last transmitted synchronous command.
    pending: Option<Expectation>,
}

impl Client {
    /// Create a client with an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client resuming an existing session.
    ///
    /// Test support only; bypasses the confirmed-login transition.
    #[doc(hidden)]
    pub fn with_session(session: Session) -> Self {
        Self { session, pending: None }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reply currently awaited. `None` between requests.
    pub fn pending(&self) -> Option<Expectation> {
        self.pending
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// Errors are fatal for the session: malformed peer payloads and events
    /// delivered out of the request/reply order.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::LineEntered(line) => self.handle_line(&line),
            ClientEvent::UndecodableLine { len } => {
                if let Some(pending) = self.pending {
                    return Err(ClientError::ReplyPending { pending });
                }
                tracing::debug!(len, "rejected locally: not UTF-8");
                Ok(reject(Rejection::InvalidEncoding { len }))
            },
            ClientEvent::ReplyReceived(payload) => self.handle_reply(&payload),
            ClientEvent::BroadcastReceived(payload) => self.handle_broadcast(&payload),
            ClientEvent::InputClosed => {
                tracing::info!("local input closed, ending session");
                Ok(vec![ClientAction::Terminate(SessionEnd::InputClosed)])
            },
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<Vec<ClientAction>, ClientError> {
        if let Some(pending) = self.pending {
            return Err(ClientError::ReplyPending { pending });
        }

        if line.len() > MAX_LINE {
            return Ok(reject(Rejection::LineTooLong { len: line.len(), max: MAX_LINE }));
        }

        let command = Command::parse(line);
        let request = match validator::validate(&command, &self.session) {
            Ok(request) => request,
            Err(rejection) => {
                tracing::debug!(keyword = ?command.keyword(), %rejection, "rejected locally");
                return Ok(reject(rejection));
            },
        };

        let bytes = encode_line(line)?;
        tracing::debug!(keyword = %request.keyword(), len = bytes.len(), "transmitting command");

        let mut actions = vec![ClientAction::Transmit(bytes)];
        if let Some(expectation) = request.expectation() {
            self.pending = Some(expectation);
            actions.push(ClientAction::AwaitReply);
        }

        Ok(actions)
    }

    fn handle_reply(&mut self, payload: &Bytes) -> Result<Vec<ClientAction>, ClientError> {
        let expectation = self.pending.take().ok_or(ClientError::UnexpectedReply)?;
        let text = decode_text(payload)?;

        if is_capacity_notice(&text) {
            return Ok(server_full(text));
        }

        let kind = interpret(expectation, &text);
        let mut actions = vec![ClientAction::Display(text)];

        match kind {
            ReplyKind::LoginAccepted => {
                if self.session.confirm_login() {
                    tracing::info!("login confirmed");
                }
            },
            ReplyKind::AccountCreated => {
                tracing::info!("account created");
            },
            ReplyKind::LoggedOut => {
                self.session.confirm_logout();
                tracing::info!("logout confirmed");
                actions.push(ClientAction::Terminate(SessionEnd::LoggedOut));
            },
            ReplyKind::Denied => {
                tracing::warn!(?expectation, "request denied by server");
            },
            ReplyKind::Listing => {},
        }

        Ok(actions)
    }

    fn handle_broadcast(&self, payload: &Bytes) -> Result<Vec<ClientAction>, ClientError> {
        let text = decode_text(payload)?;
        tracing::debug!(len = payload.len(), "broadcast received");

        if is_capacity_notice(&text) {
            return Ok(server_full(text));
        }

        Ok(vec![ClientAction::Display(text)])
    }
}

fn reject(rejection: Rejection) -> Vec<ClientAction> {
    vec![ClientAction::Reject(rejection)]
}

fn server_full(notice: String) -> Vec<ClientAction> {
    tracing::warn!("server at capacity");
    vec![ClientAction::Display(notice), ClientAction::Terminate(SessionEnd::ServerFull)]
}
