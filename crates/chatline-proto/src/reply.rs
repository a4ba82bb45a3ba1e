//! Reply discriminator.
//!
//! Replies are free text. Success or failure is inferred from a leading
//! character or phrase, one bit of signal per command. [`interpret`] is the
//! only function that knows the convention, so replacing it with a structured
//! status code touches nothing else.
//!
//! | Command   | Success                         | Failure                  |
//! |-----------|---------------------------------|--------------------------|
//! | `login`   | starts with `l`                 | anything else            |
//! | `newuser` | starts with `N`                 | anything else            |
//! | `logout`  | anything else                   | starts with `Logout failed.` |
//! | `who`     | always displayed, no outcome    |                          |

/// Leading character of a confirmed login.
pub const LOGIN_ACCEPTED_MARKER: char = 'l';

/// Leading character of a confirmed account creation.
pub const ACCOUNT_CREATED_MARKER: char = 'N';

/// Leading phrase of a refused logout.
pub const LOGOUT_FAILED_PREFIX: &str = "Logout failed.";

/// Notice the peer sends when it refuses service. Terminal for the client.
pub const CAPACITY_NOTICE: &str =
    "Maximum number of clients already connected to server. Please try again later.";

/// Reply the client is waiting for after a synchronous command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Reply to `login`.
    Login,
    /// Reply to `newuser`.
    NewUser,
    /// Reply to `logout`.
    Logout,
    /// Reply to `who`.
    Listing,
}

/// Classified reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Peer confirmed the login.
    LoginAccepted,
    /// Peer created the account. Does not log in.
    AccountCreated,
    /// Peer confirmed the logout.
    LoggedOut,
    /// Peer refused the request. Session state is unchanged.
    Denied,
    /// Informational reply with no state effect.
    Listing,
}

impl ReplyKind {
    /// Whether the peer refused the request.
    pub fn is_denied(self) -> bool {
        self == Self::Denied
    }
}

/// Classify a reply to the command described by `expectation`.
pub fn interpret(expectation: Expectation, text: &str) -> ReplyKind {
    match expectation {
        Expectation::Login if text.starts_with(LOGIN_ACCEPTED_MARKER) => ReplyKind::LoginAccepted,
        Expectation::NewUser if text.starts_with(ACCOUNT_CREATED_MARKER) => {
            ReplyKind::AccountCreated
        },
        Expectation::Login | Expectation::NewUser => ReplyKind::Denied,
        Expectation::Logout if text.starts_with(LOGOUT_FAILED_PREFIX) => ReplyKind::Denied,
        Expectation::Logout => ReplyKind::LoggedOut,
        Expectation::Listing => ReplyKind::Listing,
    }
}

/// Whether `text` is the peer's capacity-exceeded notice.
pub fn is_capacity_notice(text: &str) -> bool {
    text.starts_with(CAPACITY_NOTICE)
}
