//! Simulated server peer.
//!
//! `SimPeer` models only what the client depends on: which replies carry the
//! success discriminators, which commands get a synchronous reply, and when
//! text is pushed unsolicited. It serves exactly one connection.

use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;
use chatline_proto::{BROADCAST_RECIPIENT, reply::CAPACITY_NOTICE};

/// Reply sent for a successful login.
pub const LOGIN_OK: &str = "login successful";
/// Reply sent for bad credentials.
pub const LOGIN_DENIED: &str = "Denied. User name or password incorrect.";
/// Reply sent when an account is created.
pub const ACCOUNT_CREATED: &str = "New user account created. Please login.";
/// Reply sent when the account already exists.
pub const ACCOUNT_EXISTS: &str = "Denied. User account already exists.";
/// Reply sent when logout is refused.
pub const LOGOUT_FAILED: &str = "Logout failed.";

/// What the peer does in response to one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerResponse {
    /// Synchronous reply, if the command has one.
    pub reply: Option<Bytes>,
    /// Text pushed outside the request/reply exchange.
    pub pushes: Vec<Bytes>,
}

impl PeerResponse {
    fn reply(text: impl Into<String>) -> Self {
        Self { reply: Some(Bytes::from(text.into())), pushes: Vec::new() }
    }

    fn push(text: impl Into<String>) -> Self {
        Self { reply: None, pushes: vec![Bytes::from(text.into())] }
    }
}

/// Simulated server for a single client connection.
#[derive(Debug, Clone, Default)]
pub struct SimPeer {
    accounts: HashMap<String, String>,
    /// Other users online, visible through `who`.
    others: BTreeSet<String>,
    user: Option<String>,
    full: bool,
    refuse_logout: bool,
}

impl SimPeer {
    /// Create a peer with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account.
    #[must_use]
    pub fn with_account(mut self, user: &str, password: &str) -> Self {
        self.accounts.insert(user.to_string(), password.to_string());
        self
    }

    /// Mark another user as online.
    #[must_use]
    pub fn with_online(mut self, user: &str) -> Self {
        self.others.insert(user.to_string());
        self
    }

    /// Refuse the connection with the capacity notice.
    #[must_use]
    pub fn at_capacity(mut self) -> Self {
        self.full = true;
        self
    }

    /// Answer every logout with the refusal phrase.
    #[must_use]
    pub fn refusing_logout(mut self) -> Self {
        self.refuse_logout = true;
        self
    }

    /// Text pushed as soon as the connection opens.
    pub fn greeting(&self) -> Option<Bytes> {
        self.full.then(|| Bytes::from_static(CAPACITY_NOTICE.as_bytes()))
    }

    /// User logged in on this connection.
    pub fn logged_in(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Whether an account exists.
    pub fn has_account(&self, user: &str) -> bool {
        self.accounts.contains_key(user)
    }

    /// Process one line received from the client.
    pub fn handle_line(&mut self, line: &[u8]) -> PeerResponse {
        let text = String::from_utf8_lossy(line);
        let mut tokens = text.split_ascii_whitespace();

        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some("login"), Some(user), Some(password)) => self.login(user, password),
            (Some("newuser"), Some(user), Some(password)) => self.new_user(user, password),
            (Some("logout"), ..) => self.logout(),
            (Some("who"), ..) => self.who(),
            (Some("send"), Some(to), Some(_)) => self.send(to, &text),
            _ => {
                tracing::debug!(line = %text.trim_end(), "peer ignored line");
                PeerResponse::default()
            },
        }
    }

    fn login(&mut self, user: &str, password: &str) -> PeerResponse {
        if self.accounts.get(user).is_some_and(|stored| stored == password) {
            self.user = Some(user.to_string());
            PeerResponse::reply(LOGIN_OK)
        } else {
            PeerResponse::reply(LOGIN_DENIED)
        }
    }

    fn new_user(&mut self, user: &str, password: &str) -> PeerResponse {
        if self.accounts.contains_key(user) {
            return PeerResponse::reply(ACCOUNT_EXISTS);
        }
        self.accounts.insert(user.to_string(), password.to_string());
        PeerResponse::reply(ACCOUNT_CREATED)
    }

    fn logout(&mut self) -> PeerResponse {
        match self.user.take() {
            Some(user) if !self.refuse_logout => PeerResponse::reply(format!("{user} logout.")),
            user => {
                self.user = user;
                PeerResponse::reply(LOGOUT_FAILED)
            },
        }
    }

    fn who(&self) -> PeerResponse {
        let online: Vec<&str> =
            self.user.iter().chain(&self.others).map(String::as_str).collect();
        PeerResponse::reply(online.join(", "))
    }

    fn send(&self, to: &str, line: &str) -> PeerResponse {
        let Some(from) = self.user.as_deref() else {
            return PeerResponse::default();
        };

        // Everything after the recipient token is the message.
        let message = line
            .trim_start()
            .strip_prefix("send")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix(to))
            .map_or("", str::trim);

        if to == BROADCAST_RECIPIENT || to == from {
            PeerResponse::push(format!("{from}: {message}"))
        } else if self.others.contains(to) {
            PeerResponse::default()
        } else {
            PeerResponse::push(format!("Denied. {to} is not online."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_text(response: &PeerResponse) -> &str {
        std::str::from_utf8(response.reply.as_deref().unwrap_or_default()).unwrap()
    }

    #[test]
    fn login_requires_matching_password() {
        let mut peer = SimPeer::new().with_account("alice", "pw1");

        assert_eq!(reply_text(&peer.handle_line(b"login alice nope\n")), LOGIN_DENIED);
        assert_eq!(peer.logged_in(), None);

        assert_eq!(reply_text(&peer.handle_line(b"login alice pw1\n")), LOGIN_OK);
        assert_eq!(peer.logged_in(), Some("alice"));
    }

    #[test]
    fn new_user_refuses_duplicates() {
        let mut peer = SimPeer::new();

        assert_eq!(reply_text(&peer.handle_line(b"newuser bob pw2\n")), ACCOUNT_CREATED);
        assert_eq!(reply_text(&peer.handle_line(b"newuser bob pw2\n")), ACCOUNT_EXISTS);
        assert!(peer.has_account("bob"));
    }

    #[test]
    fn broadcast_send_echoes_full_message() {
        let mut peer = SimPeer::new().with_account("alice", "pw1");
        peer.handle_line(b"login alice pw1\n");

        let response = peer.handle_line(b"send all hello there\n");

        assert_eq!(response.reply, None);
        assert_eq!(response.pushes, vec![Bytes::from("alice: hello there")]);
    }

    #[test]
    fn who_lists_self_and_others() {
        let mut peer = SimPeer::new().with_account("alice", "pw1").with_online("carol");
        peer.handle_line(b"login alice pw1\n");

        assert_eq!(reply_text(&peer.handle_line(b"who\n")), "alice, carol");
    }

    #[test]
    fn refused_logout_keeps_user() {
        let mut peer = SimPeer::new().with_account("alice", "pw1").refusing_logout();
        peer.handle_line(b"login alice pw1\n");

        assert_eq!(reply_text(&peer.handle_line(b"logout\n")), LOGOUT_FAILED);
        assert_eq!(peer.logged_in(), Some("alice"));
    }

    #[test]
    fn full_peer_greets_with_capacity_notice() {
        assert!(SimPeer::new().greeting().is_none());
        let greeting = SimPeer::new().at_capacity().greeting();
        assert_eq!(greeting.as_deref(), Some(CAPACITY_NOTICE.as_bytes()));
    }
}
