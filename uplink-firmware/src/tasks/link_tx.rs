//! Companion module UART transmit task
//!
//! Encodes queued payloads as `net.send` requests and writes them out.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use uplink_protocol::{SendRequest, OUT_CAPACITY};

use crate::channels::REPLY_CHANNEL;

/// Application text prepended to every echoed payload
const REPLY_PREFIX: &str = "Got data: ";

/// Link TX task - sends `net.send` requests to the companion module
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let payload = REPLY_CHANNEL.receive().await;

        let request = SendRequest::with_prefix(REPLY_PREFIX, &payload);
        let mut buf = [0u8; OUT_CAPACITY];
        match request.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send net.send request: {:?}", e);
                } else {
                    trace!("net.send: {} bytes", len);
                }
            }
            Err(e) => {
                // Cannot happen with an OUT_CAPACITY buffer; log and drop
                warn!("Failed to encode net.send request: {:?}", e);
            }
        }
    }
}
