//! Outbound `net.send` request construction.
//!
//! Replies to the companion module are JSON-RPC requests of the exact shape
//! `{"method":"net.send","params":{"data":"<escaped>"}}` followed by the
//! frame delimiter. The payload travels as a JSON string, so every byte is
//! escaped per JSON string rules before it reaches the wire. Once encoded
//! and written the request is considered sent; there is no acknowledgment
//! and no retry.

use heapless::Vec;

use crate::frame::DELIMITER;
use crate::rpc::PAYLOAD_CAPACITY;

/// Method name of the outbound data request
pub const METHOD_NET_SEND: &str = "net.send";

/// Envelope before the escaped data string
const HEAD: &[u8] = br#"{"method":"net.send","params":{"data":""#;

/// Envelope after the escaped data string, delimiter excluded
const TAIL: &[u8] = br#""}}"#;

/// Worst-case encoded size of one data byte (`\u00xx`)
const MAX_ESCAPE: usize = 6;

/// Room reserved for an escaped reply prefix
const PREFIX_CAPACITY: usize = 16;

/// Upper bound on an encoded request: envelope plus a fully escaped prefix
/// and payload, plus the delimiter.
pub const OUT_CAPACITY: usize =
    HEAD.len() + TAIL.len() + 1 + (PREFIX_CAPACITY + PAYLOAD_CAPACITY) * MAX_ESCAPE;

/// Request encoding failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmitError {
    /// Output buffer cannot hold the encoded request
    BufferTooSmall,
}

/// An outbound `net.send` request borrowing its payload.
///
/// The optional prefix is application text placed in front of the payload
/// inside the `data` string; both parts go through the same escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendRequest<'a> {
    prefix: &'a str,
    payload: &'a [u8],
}

impl<'a> SendRequest<'a> {
    /// Request carrying `payload` alone
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            prefix: "",
            payload,
        }
    }

    /// Request carrying `prefix` followed by `payload`
    pub fn with_prefix(prefix: &'a str, payload: &'a [u8]) -> Self {
        Self { prefix, payload }
    }

    /// Encode this request into `buf`, delimiter included.
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EmitError> {
        let mut out = Writer { buf, at: 0 };
        out.raw(HEAD)?;
        out.escaped(self.prefix.as_bytes())?;
        out.escaped(self.payload)?;
        out.raw(TAIL)?;
        out.byte(DELIMITER)?;
        Ok(out.at)
    }

    /// Encode this request into a bounded vec, delimiter included.
    pub fn encode_to_vec(&self) -> Result<Vec<u8, OUT_CAPACITY>, EmitError> {
        let mut vec = Vec::new();
        // A fresh Vec always fits its own capacity
        let _ = vec.resize_default(OUT_CAPACITY);
        let len = self.encode(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }
}

/// Bounds-checked cursor over the output buffer
struct Writer<'a> {
    buf: &'a mut [u8],
    at: usize,
}

impl Writer<'_> {
    fn byte(&mut self, byte: u8) -> Result<(), EmitError> {
        if self.at >= self.buf.len() {
            return Err(EmitError::BufferTooSmall);
        }
        self.buf[self.at] = byte;
        self.at += 1;
        Ok(())
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<(), EmitError> {
        if self.buf.len() - self.at < bytes.len() {
            return Err(EmitError::BufferTooSmall);
        }
        self.buf[self.at..self.at + bytes.len()].copy_from_slice(bytes);
        self.at += bytes.len();
        Ok(())
    }

    /// Write `bytes` as JSON string content.
    ///
    /// Quote, backslash and the short-escape control characters use their
    /// two-character forms; any other byte below 0x20 or at/above 0x7f is
    /// written as `\u00xx`. Printable ASCII passes through verbatim.
    fn escaped(&mut self, bytes: &[u8]) -> Result<(), EmitError> {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        for &byte in bytes {
            match byte {
                b'"' => self.raw(b"\\\"")?,
                b'\\' => self.raw(b"\\\\")?,
                0x08 => self.raw(b"\\b")?,
                b'\t' => self.raw(b"\\t")?,
                b'\n' => self.raw(b"\\n")?,
                0x0c => self.raw(b"\\f")?,
                b'\r' => self.raw(b"\\r")?,
                0x20..=0x7e => self.byte(byte)?,
                _ => self.raw(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX[usize::from(byte >> 4)],
                    HEX[usize::from(byte & 0x0f)],
                ])?,
            }
        }
        Ok(())
    }
}
