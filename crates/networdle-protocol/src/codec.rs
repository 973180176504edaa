//! Frame codec: converts text messages to and from wire lines.
//!
//! A frame is a run of ASCII bytes (0–127) ending in a single line feed.
//! There is no escaping and no length prefix; one message is one line.
//!
//! Validation is kept apart from decoding. [`is_valid_frame`] answers
//! "may I accept this?" without producing an error, which is what the
//! session uses to drop misbehaving clients, while [`decode`] only insists
//! on the terminator so it can also be used on trusted input.

use crate::ProtocolError;

/// The line terminator that ends every frame.
pub const LINE_FEED: u8 = b'\n';

/// Replacement byte for characters a US-ASCII encoder cannot represent.
const UNMAPPABLE: u8 = b'?';

/// Encodes `message` as a frame: one byte per character plus `\n`.
///
/// Characters outside ASCII become `?`. The message must not contain a
/// line feed of its own; that is the caller's job to guarantee.
///
/// ```rust
/// assert_eq!(networdle_protocol::encode("START GAME"), b"START GAME\n");
/// ```
pub fn encode(message: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(message.len() + 1);
    frame.extend(
        message
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { UNMAPPABLE }),
    );
    frame.push(LINE_FEED);
    frame
}

/// Decodes a frame back into text, removing exactly one trailing `\n`.
///
/// Bytes above 127 decode to U+FFFD; use [`is_valid_frame`] first when
/// the input comes from the network.
///
/// # Errors
/// Returns [`ProtocolError::MalformedFrame`] if the buffer is empty or does
/// not end in a line feed.
pub fn decode(frame: &[u8]) -> Result<String, ProtocolError> {
    let body = match frame.split_last() {
        Some((&LINE_FEED, body)) => body,
        Some(_) => {
            return Err(ProtocolError::MalformedFrame(
                "missing line feed terminator".into(),
            ));
        }
        None => {
            return Err(ProtocolError::MalformedFrame("empty frame".into()));
        }
    };

    Ok(body
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                b as char
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect())
}

/// Returns `true` iff `frame` is non-empty, all ASCII, and ends in `\n`.
pub fn is_valid_frame(frame: &[u8]) -> bool {
    validate(frame).is_ok()
}

/// Checks the framing rules and reports which one failed.
///
/// # Errors
/// Returns [`ProtocolError::MalformedFrame`] describing the first broken rule.
pub fn validate(frame: &[u8]) -> Result<(), ProtocolError> {
    if frame.last() != Some(&LINE_FEED) {
        let reason = if frame.is_empty() {
            "empty frame".to_string()
        } else {
            "missing line feed terminator".to_string()
        };
        return Err(ProtocolError::MalformedFrame(reason));
    }
    if let Some(position) = frame.iter().position(|b| !b.is_ascii()) {
        return Err(ProtocolError::MalformedFrame(format!(
            "non-ASCII byte at offset {position}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_appends_single_line_feed() {
        assert_eq!(encode("CRANE"), b"CRANE\n");
        assert_eq!(encode(""), b"\n");
    }

    #[test]
    fn test_encode_replaces_non_ascii() {
        assert_eq!(encode("caf\u{e9}"), b"caf?\n");
    }

    #[test]
    fn test_decode_strips_exactly_one_terminator() {
        assert_eq!(decode(b"GAME OVER\n").unwrap(), "GAME OVER");
        assert_eq!(decode(b"A\n\n").unwrap(), "A\n");
        assert_eq!(decode(b"\n").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_empty_and_unterminated() {
        assert!(matches!(decode(b""), Err(ProtocolError::MalformedFrame(_))));
        assert!(matches!(
            decode(b"CRANE"),
            Err(ProtocolError::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_decode_maps_high_bytes_to_replacement() {
        assert_eq!(decode(&[b'A', 0xC3, b'\n']).unwrap(), "A\u{FFFD}");
    }

    #[test]
    fn test_round_trip_for_ascii_lines() {
        for s in ["", "START GAME", "paPl_", "12", "INVALID GUESS", " \t~"] {
            assert_eq!(decode(&encode(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_is_valid_frame_accepts_ascii_line() {
        assert!(is_valid_frame(b"START GAME\n"));
        assert!(is_valid_frame(b"\n"));
    }

    #[test]
    fn test_is_valid_frame_rejects_corruption() {
        assert!(!is_valid_frame(b""));
        assert!(!is_valid_frame(b"CRANE"));
        assert!(!is_valid_frame(b"CRANE\n "));
        assert!(!is_valid_frame(&[b'C', 0x80, b'\n']));
        assert!(!is_valid_frame(&[0xFF, b'\n']));
    }

    #[test]
    fn test_validate_reports_offending_offset() {
        let err = validate(&[b'A', b'B', 0x9F, b'\n']).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::MalformedFrame("non-ASCII byte at offset 2".into())
        );
    }
}
