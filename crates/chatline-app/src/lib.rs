//! Application layer for the chatline client
//!
//! Generic session coordinator that runs the same orchestration code against
//! a real terminal and socket or against a deterministic simulation.
//!
//! # Components
//!
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Input`]: One unit of readiness from either input source
//! - [`Runtime`]: Generic event loop driving a [`chatline_client::Client`]
//! - [`RuntimeError`]: Fatal runtime failures

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod error;
mod input;
mod runtime;

pub use chatline_client::SessionEnd;
pub use driver::Driver;
pub use error::RuntimeError;
pub use input::Input;
pub use runtime::Runtime;
