//! Fuzz target for the client state machine
//!
//! Drives `Client` with arbitrary interleavings of operator lines, replies
//! and broadcasts.
//!
//! # Invariants
//!
//! - No line is transmitted while a reply is pending
//! - While anonymous only `login`/`newuser` reach the wire
//! - While authenticated `login`/`newuser` never reach the wire
//! - Transmitted bytes are exactly the operator's line
//! - After `Terminate` no further event is processed

#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use chatline_client::{Client, ClientAction, ClientEvent};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Line(LineInput),
    Reply(Vec<u8>),
    Broadcast(Vec<u8>),
    InputClosed,
}

/// Mostly well-formed commands so validation gets past the first check.
#[derive(Debug, Arbitrary)]
enum LineInput {
    Login(String, String),
    NewUser(String, String),
    Send(String, String),
    Logout,
    Who,
    Raw(String),
}

impl LineInput {
    fn render(&self) -> String {
        match self {
            Self::Login(user, password) => format!("login {user} {password}\n"),
            Self::NewUser(user, password) => format!("newuser {user} {password}\n"),
            Self::Send(to, message) => format!("send {to} {message}\n"),
            Self::Logout => "logout\n".to_string(),
            Self::Who => "who\n".to_string(),
            Self::Raw(line) => line.clone(),
        }
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut client = Client::new();

    for step in steps {
        let was_pending = client.pending().is_some();
        let was_authenticated = client.session().is_authenticated();

        let (event, line) = match step {
            Step::Line(input) => {
                let line = input.render();
                (ClientEvent::LineEntered(line.clone()), Some(line))
            },
            Step::Reply(payload) => (ClientEvent::ReplyReceived(Bytes::from(payload)), None),
            Step::Broadcast(payload) => {
                (ClientEvent::BroadcastReceived(Bytes::from(payload)), None)
            },
            Step::InputClosed => (ClientEvent::InputClosed, None),
        };

        let Ok(actions) = client.handle(event) else {
            return;
        };

        for action in &actions {
            if let ClientAction::Transmit(bytes) = action {
                assert!(!was_pending);
                let line = line.as_deref().unwrap_or_default();
                assert_eq!(&bytes[..], line.as_bytes());

                let keyword = line.split_ascii_whitespace().next().unwrap_or_default();
                let credential = matches!(keyword, "login" | "newuser");
                assert_eq!(credential, !was_authenticated);
            }
        }

        if actions.iter().any(|action| matches!(action, ClientAction::Terminate(_))) {
            return;
        }
    }
});
