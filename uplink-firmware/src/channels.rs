//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use uplink_protocol::Payload;

/// Channel capacity for decoded payloads awaiting a reply
const REPLY_CHANNEL_SIZE: usize = 4;

/// Decoded `net.recv` payloads waiting to be echoed back to the companion
/// module as `net.send` requests
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Payload, REPLY_CHANNEL_SIZE> =
    Channel::new();
