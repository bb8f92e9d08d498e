//! Newline-delimited frame assembly for the serial link.
//!
//! Bytes accumulate one at a time until the delimiter arrives. A frame that
//! would outgrow the buffer is dropped in its entirety and accumulation
//! restarts with the next byte; the link carries no error channel, so an
//! oversized frame simply vanishes.

use heapless::Vec;

/// Frame delimiter byte
pub const DELIMITER: u8 = b'\n';

/// Maximum size of one inbound frame, delimiter excluded
pub const FRAME_CAPACITY: usize = 256;

/// A complete inbound frame, detached from the assembler.
///
/// Holds the frame content without the trailing delimiter. Exists for one
/// dispatch cycle; an empty frame (bare delimiter on the wire) is valid and
/// must be tolerated downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    bytes: Vec<u8, FRAME_CAPACITY>,
}

impl RawFrame {
    /// Frame content, delimiter excluded
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of content bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for a bare-delimiter frame
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Build a frame directly from its content (for tests and simulation).
    ///
    /// Returns `None` if `data` exceeds the frame capacity.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        Vec::from_slice(data).ok().map(|bytes| Self { bytes })
    }
}

/// Accumulates serial bytes into newline-delimited frames.
///
/// One assembler owns the single receive buffer of the link. It is fed one
/// byte at a time and hands out at most one complete frame per delimiter;
/// the caller processes that frame to completion before feeding the next
/// byte, which keeps frames strictly ordered with one in flight.
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    buf: Vec<u8, FRAME_CAPACITY>,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Discard any partially accumulated frame
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Number of bytes accumulated toward the next frame
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Feed one byte from the serial link.
    ///
    /// Returns the completed frame when `byte` is the delimiter, leaving
    /// the assembler empty. A non-delimiter byte that would exceed the
    /// buffer capacity resets the assembler instead; the oversized frame is
    /// discarded silently and no error surfaces anywhere.
    pub fn feed(&mut self, byte: u8) -> Option<RawFrame> {
        if byte == DELIMITER {
            return Some(RawFrame {
                bytes: core::mem::take(&mut self.buf),
            });
        }

        if self.buf.push(byte).is_err() {
            self.buf.clear();
        }
        None
    }
}
