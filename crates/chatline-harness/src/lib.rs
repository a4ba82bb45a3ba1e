//! Deterministic simulation harness for chatline client testing.
//!
//! In-memory implementations of the I/O seams so the production
//! [`chatline_app::Runtime`] can be driven through whole sessions without a
//! terminal or a socket.
//!
//! - [`SimDriver`]: scripted operator input, captured output, in-memory
//!   connection
//! - [`SimPeer`]: model of the server's observable reply contract

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sim_driver;
pub mod sim_peer;

pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_peer::{PeerResponse, SimPeer};
