//! Line capacity and the verbatim line codec.
//!
//! Layout on the wire: the operator's line, byte for byte, including the
//! trailing newline if one was typed. Replies are raw text with no terminator
//! guarantee; a NUL byte, when present, ends the text.
//!
//! # Invariants
//!
//! - Capacity: no line sent or received exceeds [`MAX_LINE`] bytes. Outbound
//!   lines over the limit are rejected, never truncated. Inbound payloads over
//!   the limit are a protocol violation.

use bytes::Bytes;

use crate::{
    MAX_MESSAGE_LEN, MAX_USER_ID_LEN,
    errors::{ProtocolError, Result},
};

/// Line capacity in bytes.
///
/// Sized for the longest command: `send` + space + user ID + space + message.
pub const MAX_LINE: usize = "send".len() + 1 + MAX_USER_ID_LEN + 1 + MAX_MESSAGE_LEN;

/// Encode an operator line for transmission.
///
/// The line is sent exactly as typed; the peer parses the raw text.
///
/// # Errors
///
/// - `ProtocolError::LineTooLong` if the line exceeds [`MAX_LINE`] bytes
pub fn encode_line(line: &str) -> Result<Bytes> {
    check_capacity(line.len())?;
    Ok(Bytes::copy_from_slice(line.as_bytes()))
}

/// Decode a received payload into display text.
///
/// Text ends at the first NUL byte if the peer sent one. Invalid UTF-8 is
/// replaced rather than rejected since the text is only displayed.
///
/// # Errors
///
/// - `ProtocolError::EmptyPayload` if `payload` is empty
/// - `ProtocolError::LineTooLong` if the payload exceeds [`MAX_LINE`] bytes
pub fn decode_text(payload: &[u8]) -> Result<String> {
    if payload.is_empty() {
        return Err(ProtocolError::EmptyPayload);
    }
    check_capacity(payload.len())?;

    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    Ok(String::from_utf8_lossy(&payload[..end]).into_owned())
}

/// Reject lengths over the line capacity.
pub fn check_capacity(len: usize) -> Result<()> {
    if len > MAX_LINE {
        return Err(ProtocolError::LineTooLong { len, max: MAX_LINE });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_fits_longest_send() {
        assert_eq!(MAX_LINE, 294);
    }

    #[test]
    fn encode_keeps_trailing_newline() {
        let encoded = encode_line("login abc pw1\n").unwrap();
        assert_eq!(&encoded[..], b"login abc pw1\n");
    }

    #[test]
    fn encode_rejects_over_capacity() {
        let line = "x".repeat(MAX_LINE + 1);
        assert_eq!(
            encode_line(&line),
            Err(ProtocolError::LineTooLong { len: MAX_LINE + 1, max: MAX_LINE })
        );
    }

    #[test]
    fn encode_accepts_exact_capacity() {
        let line = "x".repeat(MAX_LINE);
        assert_eq!(encode_line(&line).map(|b| b.len()), Ok(MAX_LINE));
    }

    #[test]
    fn decode_stops_at_nul() {
        assert_eq!(decode_text(b"login successful\0garbage").unwrap(), "login successful");
    }

    #[test]
    fn decode_rejects_empty_payload() {
        assert_eq!(decode_text(b""), Err(ProtocolError::EmptyPayload));
    }

    #[test]
    fn decode_rejects_overflow() {
        let payload = vec![b'a'; MAX_LINE + 1];
        assert!(matches!(decode_text(&payload), Err(ProtocolError::LineTooLong { .. })));
    }

    #[test]
    fn decode_replaces_invalid_utf8() {
        assert_eq!(decode_text(&[b'h', 0xff, b'i']).unwrap(), "h\u{fffd}i");
    }
}
