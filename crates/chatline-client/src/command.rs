//! Operator command tokenization.

use chatline_proto::Keyword;

/// One tokenized operator line.
///
/// Each variant carries the whitespace-delimited argument tokens that followed
/// the keyword, in order. Parsing never fails: anything that does not start
/// with a known keyword is [`Command::Unrecognized`]. Whether the arguments
/// are acceptable is decided by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `login` and its arguments.
    Login(Vec<String>),
    /// `newuser` and its arguments.
    NewUser(Vec<String>),
    /// `send` and its arguments.
    Send(Vec<String>),
    /// `logout` and its arguments.
    Logout(Vec<String>),
    /// `who` and its arguments.
    Who(Vec<String>),
    /// Unknown leading token. Empty for a blank line.
    Unrecognized(String),
}

impl Command {
    /// Tokenize a line on ASCII whitespace.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_ascii_whitespace();
        let keyword = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_owned).collect();

        match Keyword::parse(keyword) {
            Some(Keyword::Login) => Self::Login(args),
            Some(Keyword::NewUser) => Self::NewUser(args),
            Some(Keyword::Send) => Self::Send(args),
            Some(Keyword::Logout) => Self::Logout(args),
            Some(Keyword::Who) => Self::Who(args),
            None => Self::Unrecognized(keyword.to_owned()),
        }
    }

    /// Command keyword. `None` if unrecognized.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            Self::Login(_) => Some(Keyword::Login),
            Self::NewUser(_) => Some(Keyword::NewUser),
            Self::Send(_) => Some(Keyword::Send),
            Self::Logout(_) => Some(Keyword::Logout),
            Self::Who(_) => Some(Keyword::Who),
            Self::Unrecognized(_) => None,
        }
    }

    /// Argument tokens following the keyword. Empty if unrecognized.
    pub fn args(&self) -> &[String] {
        match self {
            Self::Login(args)
            | Self::NewUser(args)
            | Self::Send(args)
            | Self::Logout(args)
            | Self::Who(args) => args,
            Self::Unrecognized(_) => &[],
        }
    }
}
