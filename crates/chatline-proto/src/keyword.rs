//! Command keywords.

use std::fmt;

/// Command keyword that leads every operator line.
///
/// Keywords are case-sensitive: `Login` is not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `login <userID> <password>`
    Login,
    /// `newuser <userID> <password>`
    NewUser,
    /// `send <recipientID> <message...>`
    Send,
    /// `logout`
    Logout,
    /// `who`
    Who,
}

impl Keyword {
    /// All keywords, in the order they are listed to the operator.
    pub const ALL: [Self; 5] = [Self::Login, Self::NewUser, Self::Send, Self::Who, Self::Logout];

    /// Parse a keyword token. `None` if the token is not a command.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "login" => Some(Self::Login),
            "newuser" => Some(Self::NewUser),
            "send" => Some(Self::Send),
            "logout" => Some(Self::Logout),
            "who" => Some(Self::Who),
            _ => None,
        }
    }

    /// Wire spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::NewUser => "newuser",
            Self::Send => "send",
            Self::Logout => "logout",
            Self::Who => "who",
        }
    }

    /// Usage synopsis shown when the arguments are malformed.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Login => "login userID password",
            Self::NewUser => "newuser userID password",
            Self::Send => "send recipientID message",
            Self::Logout => "logout",
            Self::Who => "who",
        }
    }

    /// Whether the command may only be issued after a confirmed login.
    pub fn requires_login(self) -> bool {
        matches!(self, Self::Send | Self::Logout | Self::Who)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
