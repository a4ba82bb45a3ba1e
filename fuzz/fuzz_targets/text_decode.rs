//! Fuzz target for peer text decoding and reply interpretation
//!
//! Arbitrary bytes as received from the socket. Decoding must never panic;
//! oversized and empty payloads must be rejected, everything else decodes
//! and classifies under every expectation.

#![no_main]

use chatline_proto::{Expectation, MAX_LINE, decode_text, interpret, is_capacity_notice};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = decode_text(data) else {
        assert!(data.is_empty() || data.len() > MAX_LINE);
        return;
    };

    assert!(!text.contains('\0'));

    for expectation in [Expectation::Login, Expectation::NewUser, Expectation::Logout] {
        let _ = interpret(expectation, &text);
    }
    let _ = is_capacity_notice(&text);
});
