//! Terminal client for chatline
//!
//! A thin shell over [`chatline_app::Driver`] that reads operator lines from
//! stdin and talks to the server over TCP. All orchestration logic lives in
//! the generic [`chatline_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;

pub use chatline_app::{Driver, Runtime, RuntimeError, SessionEnd};
pub use terminal::{TerminalDriver, TerminalError};
