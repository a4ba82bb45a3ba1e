//! Local command validation.
//!
//! Turns a [`Command`] into a [`Request`] or a [`Rejection`] without any
//! network round trip. Validation reads the [`Session`] but never mutates it.
//!
//! Checks run in a fixed order per command and the first failure wins:
//!
//! - `login`/`newuser`: already logged in, argument count, user ID length,
//!   password length, reserved user ID.
//! - `send`: not logged in, empty message, recipient length.
//! - `logout`/`who`: not logged in, trailing tokens.

use std::{fmt, ops::RangeInclusive};

use chatline_proto::{
    BROADCAST_RECIPIENT, Expectation, Keyword, MAX_PASSWORD_LEN, MAX_USER_ID_LEN,
    MIN_PASSWORD_LEN, MIN_USER_ID_LEN,
};

use crate::{Command, Rejection, Session};

const USER_ID_LEN: RangeInclusive<usize> = MIN_USER_ID_LEN..=MAX_USER_ID_LEN;
const PASSWORD_LEN: RangeInclusive<usize> = MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN;

/// Validated user identifier: 3..=32 bytes, never `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated password: 3..=32 bytes.
///
/// `Debug` is redacted so passwords never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Password text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated `send` recipient: 3..=32 bytes. May be `"all"` (broadcast).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipient(String);

impl Recipient {
    /// Recipient text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the message is addressed to every logged-in user.
    pub fn is_broadcast(&self) -> bool {
        self.0 == BROADCAST_RECIPIENT
    }
}

/// Command that passed local validation and may be transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Log in as an existing user.
    Login {
        /// Account to log in as
        user_id: UserId,
        /// Account password
        password: Password,
    },
    /// Create a new account.
    NewUser {
        /// Account to create
        user_id: UserId,
        /// Account password
        password: Password,
    },
    /// Send a message.
    Send {
        /// Addressee, or `"all"`
        recipient: Recipient,
        /// First token of the message. The full line is what gets transmitted.
        message: String,
    },
    /// End the session.
    Logout,
    /// List logged-in users.
    Who,
}

impl Request {
    /// Command keyword.
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Login { .. } => Keyword::Login,
            Self::NewUser { .. } => Keyword::NewUser,
            Self::Send { .. } => Keyword::Send,
            Self::Logout => Keyword::Logout,
            Self::Who => Keyword::Who,
        }
    }

    /// Reply to wait for after transmitting. `None` for `send`, whose echo
    /// arrives as an ordinary broadcast.
    pub fn expectation(&self) -> Option<Expectation> {
        match self {
            Self::Login { .. } => Some(Expectation::Login),
            Self::NewUser { .. } => Some(Expectation::NewUser),
            Self::Logout => Some(Expectation::Logout),
            Self::Who => Some(Expectation::Listing),
            Self::Send { .. } => None,
        }
    }
}

/// Validate a command against the current session.
///
/// # Errors
///
/// Returns the first [`Rejection`] in the command's check order.
pub fn validate(command: &Command, session: &Session) -> Result<Request, Rejection> {
    match command {
        Command::Login(args) => {
            let (user_id, password) = validate_credentials(Keyword::Login, args, session)?;
            Ok(Request::Login { user_id, password })
        },
        Command::NewUser(args) => {
            let (user_id, password) = validate_credentials(Keyword::NewUser, args, session)?;
            Ok(Request::NewUser { user_id, password })
        },
        Command::Send(args) => validate_send(args, session),
        Command::Logout(args) => {
            validate_bare(Keyword::Logout, args, session)?;
            Ok(Request::Logout)
        },
        Command::Who(args) => {
            validate_bare(Keyword::Who, args, session)?;
            Ok(Request::Who)
        },
        Command::Unrecognized(keyword) => {
            Err(Rejection::InvalidCommand { keyword: keyword.clone() })
        },
    }
}

fn validate_credentials(
    keyword: Keyword,
    args: &[String],
    session: &Session,
) -> Result<(UserId, Password), Rejection> {
    if session.is_authenticated() {
        return Err(Rejection::AlreadyLoggedIn);
    }

    let [user_id, password] = args else {
        return Err(Rejection::Usage(keyword));
    };

    if !USER_ID_LEN.contains(&user_id.len()) {
        return Err(Rejection::UserIdLength { len: user_id.len() });
    }

    if !PASSWORD_LEN.contains(&password.len()) {
        return Err(Rejection::PasswordLength { len: password.len() });
    }

    if user_id == BROADCAST_RECIPIENT {
        return Err(Rejection::ReservedUserId);
    }

    Ok((UserId(user_id.clone()), Password(password.clone())))
}

fn validate_send(args: &[String], session: &Session) -> Result<Request, Rejection> {
    if !session.is_authenticated() {
        return Err(Rejection::NotLoggedIn);
    }

    let recipient = args.first().map_or("", String::as_str);
    let message = args.get(1).map_or("", String::as_str);

    if message.is_empty() {
        return Err(Rejection::EmptyMessage);
    }

    if !USER_ID_LEN.contains(&recipient.len()) {
        return Err(Rejection::RecipientLength { len: recipient.len() });
    }

    Ok(Request::Send { recipient: Recipient(recipient.to_owned()), message: message.to_owned() })
}

fn validate_bare(keyword: Keyword, args: &[String], session: &Session) -> Result<(), Rejection> {
    if !session.is_authenticated() {
        return Err(Rejection::NotLoggedIn);
    }

    if !args.is_empty() {
        return Err(Rejection::Usage(keyword));
    }

    Ok(())
}
