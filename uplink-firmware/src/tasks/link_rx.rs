//! Companion module UART receive task
//!
//! Assembles inbound bytes into frames and dispatches them.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use uplink_protocol::{dispatch, FrameAssembler, Ignored};

use crate::channels::REPLY_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - assembles and dispatches frames from the companion module
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut assembler = FrameAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // Read available bytes
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                // Feed bytes to the assembler; each completed frame is
                // dispatched before the next byte is considered
                for &byte in &buf[..n] {
                    if let Some(frame) = assembler.feed(byte) {
                        handle_frame(frame.as_bytes());
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Dispatch one complete frame and queue any reply payload
fn handle_frame(frame: &[u8]) {
    match dispatch(frame) {
        Ok(payload) => {
            debug!("net.recv: {} bytes", payload.len());
            // Queue for the TX task, dropping if full - the protocol has
            // no flow control
            if REPLY_CHANNEL.try_send(payload).is_err() {
                warn!("Reply channel full, dropping payload");
            }
        }
        Err(Ignored::UnknownMethod) => {
            // Reserved notifications (sys.time, vcon.status, ...) land here
            trace!("Frame ignored: unknown method");
        }
        Err(reason) => {
            trace!("Frame ignored: {:?}", reason);
        }
    }
}
