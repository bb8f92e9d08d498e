//! Uplink serial bridge protocol
//!
//! This crate implements the JSON-RPC protocol spoken between the
//! microcontroller and its companion networking module (the TCP/WebSocket/
//! MQTT terminator) over a UART link. The protocol is designed for
//! simplicity and robustness on a link with no error channel.
//!
//! # Protocol Overview
//!
//! Frames are newline-delimited JSON-RPC notifications, at most 256 bytes:
//!
//! ```text
//! module -> mcu:  {"method":"net.recv","params":{"base64":"<base64>"}}\n
//! mcu -> module:  {"method":"net.send","params":{"data":"<escaped>"}}\n
//! ```
//!
//! There is no length prefix, no checksum and no response correlation.
//! Frames that are oversized, malformed, or carry an unrecognized method
//! are dropped without any reply; the peer has no channel for error
//! notifications, so silence is the protocol's only failure mode.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod json;
pub mod rpc;
pub mod send;

pub use frame::{FrameAssembler, RawFrame, DELIMITER, FRAME_CAPACITY};
pub use json::{locate, Span};
pub use rpc::{dispatch, Ignored, Payload, METHOD_NET_RECV, PAYLOAD_CAPACITY};
pub use send::{EmitError, SendRequest, METHOD_NET_SEND, OUT_CAPACITY};
