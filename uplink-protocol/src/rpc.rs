//! Inbound JSON-RPC frame dispatch.
//!
//! The only method acted on is `net.recv`, which carries base64-encoded
//! network data from the companion module. Everything else (unknown
//! methods, missing fields, undecodable payloads) ignores the frame
//! without a response; the peer has no channel for error notifications.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use heapless::Vec;

use crate::frame::FRAME_CAPACITY;
use crate::json;

/// Method name of the inbound data notification
pub const METHOD_NET_RECV: &str = "net.recv";

/// JSON path of the method field
const METHOD_PATH: &str = "$.method";

/// JSON path of the payload field within a `net.recv` notification
const PAYLOAD_PATH: &str = "$.params.base64";

/// Maximum decoded payload size.
///
/// Base64 shrinks four encoded bytes to three decoded, so the payload of
/// any frame that fits the assembler also fits this bound.
pub const PAYLOAD_CAPACITY: usize = FRAME_CAPACITY / 4 * 3;

/// Decoded payload of a `net.recv` notification
pub type Payload = Vec<u8, PAYLOAD_CAPACITY>;

/// Why an inbound frame produced no reply.
///
/// Every variant is wire-silent: the peer never sees a difference. The
/// reasons exist so the firmware can log dispatch outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ignored {
    /// `$.method` is missing or not a JSON string
    NoMethod,
    /// Method other than `net.recv`. Reserved notifications such as
    /// `sys.time` and `vcon.status` land here until a handler exists.
    UnknownMethod,
    /// `$.params.base64` is missing or not a JSON string
    NoPayload,
    /// Payload content is not valid base64
    BadBase64,
}

/// Dispatch one complete frame.
///
/// Returns the decoded payload of a `net.recv` notification, or the reason
/// the frame was ignored. Pure function of the frame bytes: dispatching the
/// same frame twice yields the same result.
pub fn dispatch(frame: &[u8]) -> Result<Payload, Ignored> {
    let method = locate_string(frame, METHOD_PATH).ok_or(Ignored::NoMethod)?;
    if method != METHOD_NET_RECV.as_bytes() {
        return Err(Ignored::UnknownMethod);
    }

    let encoded = locate_string(frame, PAYLOAD_PATH).ok_or(Ignored::NoPayload)?;
    decode_payload(encoded)
}

/// Content bytes of the string value at `path`, quotes stripped.
fn locate_string<'a>(doc: &'a [u8], path: &str) -> Option<&'a [u8]> {
    let span = json::locate(doc, path)?;
    match span.slice(doc)? {
        [b'"', content @ .., b'"'] => Some(content),
        _ => None,
    }
}

/// Decode base64 content into a fresh bounded payload.
///
/// Strict: an invalid alphabet byte or malformed padding rejects the whole
/// payload rather than salvaging a prefix.
fn decode_payload(encoded: &[u8]) -> Result<Payload, Ignored> {
    let mut payload = Payload::new();
    // A fresh Vec always fits its own capacity
    let _ = payload.resize_default(PAYLOAD_CAPACITY);

    let len = STANDARD
        .decode_slice(encoded, &mut payload)
        .map_err(|_| Ignored::BadBase64)?;
    payload.truncate(len);
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameAssembler, DELIMITER};
    use crate::send::SendRequest;

    #[test]
    fn test_net_recv_decodes_payload() {
        let frame = br#"{"method":"net.recv","params":{"base64":"aGVsbG8K"}}"#;
        let payload = dispatch(frame).unwrap();
        assert_eq!(payload.as_slice(), b"hello\n");
    }

    #[test]
    fn test_extra_fields_do_not_change_outcome() {
        let frame = br#"{"id":7,"extra":[1,{"base64":"no"}],"method":"net.recv","params":{"other":true,"base64":"aGVsbG8K"}}"#;
        let payload = dispatch(frame).unwrap();
        assert_eq!(payload.as_slice(), b"hello\n");
    }

    #[test]
    fn test_near_miss_methods_are_ignored() {
        for method in ["net.recv2", "xnet.recv", "net.rec", "NET.RECV", "sys.time", "vcon.status"] {
            let mut frame = std::vec::Vec::new();
            frame.extend_from_slice(br#"{"method":""#);
            frame.extend_from_slice(method.as_bytes());
            frame.extend_from_slice(br#"","params":{"base64":"aGVsbG8K"}}"#);
            assert_eq!(dispatch(&frame), Err(Ignored::UnknownMethod), "{method}");
        }
    }

    #[test]
    fn test_missing_or_malformed_method() {
        assert_eq!(dispatch(b""), Err(Ignored::NoMethod));
        assert_eq!(dispatch(b"not json at all"), Err(Ignored::NoMethod));
        assert_eq!(dispatch(br#"{"params":{"base64":"aGVsbG8K"}}"#), Err(Ignored::NoMethod));
        assert_eq!(dispatch(br#"{"method":42}"#), Err(Ignored::NoMethod));
    }

    #[test]
    fn test_missing_or_malformed_payload_field() {
        assert_eq!(dispatch(br#"{"method":"net.recv"}"#), Err(Ignored::NoPayload));
        assert_eq!(dispatch(br#"{"method":"net.recv","params":{}}"#), Err(Ignored::NoPayload));
        assert_eq!(
            dispatch(br#"{"method":"net.recv","params":{"base64":123}}"#),
            Err(Ignored::NoPayload)
        );
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        assert_eq!(
            dispatch(br#"{"method":"net.recv","params":{"base64":"!!!!"}}"#),
            Err(Ignored::BadBase64)
        );
        // Truncated to a non-canonical length
        assert_eq!(
            dispatch(br#"{"method":"net.recv","params":{"base64":"aGVsbG8"}}"#),
            Err(Ignored::BadBase64)
        );
    }

    #[test]
    fn test_empty_payload() {
        let payload = dispatch(br#"{"method":"net.recv","params":{"base64":""}}"#).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let frame = br#"{"method":"net.recv","params":{"base64":"aGVsbG8K"}}"#;
        assert_eq!(dispatch(frame), dispatch(frame));
    }

    #[test]
    fn test_valid_frame_after_overflow_is_processed() {
        use crate::frame::FRAME_CAPACITY;

        let mut asm = FrameAssembler::new();
        for _ in 0..FRAME_CAPACITY + 1 {
            assert!(asm.feed(b'x').is_none());
        }

        for &byte in br#"{"method":"net.recv","params":{"base64":"aGVsbG8K"}}"#.as_slice() {
            assert!(asm.feed(byte).is_none());
        }
        let frame = asm.feed(DELIMITER).unwrap();
        let payload = dispatch(frame.as_bytes()).unwrap();
        assert_eq!(payload.as_slice(), b"hello\n");
    }

    #[test]
    fn test_echo_scenario_end_to_end() {
        // Reference scenario: assemble, dispatch, and echo with the
        // application's reply template
        let mut asm = FrameAssembler::new();
        for &byte in br#"{"method":"net.recv","params":{"base64":"aGVsbG8K"}}"#.as_slice() {
            assert!(asm.feed(byte).is_none());
        }
        let frame = asm.feed(DELIMITER).unwrap();

        let payload = dispatch(frame.as_bytes()).unwrap();
        assert_eq!(payload.as_slice(), b"hello\n");

        let reply = SendRequest::with_prefix("Got data: ", &payload)
            .encode_to_vec()
            .unwrap();
        assert_eq!(
            reply.as_slice(),
            b"{\"method\":\"net.send\",\"params\":{\"data\":\"Got data: hello\\n\"}}\n".as_slice()
        );
    }
}
