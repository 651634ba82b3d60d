//! In-process link pair for running both nodes on one host.
//!
//! Each end owns the sending half of one `mpsc` channel and the receiving
//! half of the other, so bytes arrive in order and `receive_byte` blocks
//! exactly like the UART does. Dropping one end makes the other report
//! [`LinkError::Disconnected`] instead of blocking forever.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::LinkError;
use crate::protocol::link::Link;

pub struct LoopbackLink {
    tx: Sender<u8>,
    rx: Receiver<u8>,
}

impl LoopbackLink {
    /// Two connected ends: whatever one sends, the other receives.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel();
        let (b_tx, a_rx) = mpsc::channel();
        (Self { tx: a_tx, rx: a_rx }, Self { tx: b_tx, rx: b_rx })
    }
}

impl Link for LoopbackLink {
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.tx.send(byte).map_err(|_| LinkError::Disconnected)
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        self.rx.recv().map_err(|_| LinkError::Disconnected)
    }
}
