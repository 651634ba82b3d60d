//! Link abstraction: the single serial byte channel between the nodes.
//!
//! Concrete implementations:
//! - UART (ESP-IDF driver) in [`adapters::uart`](crate::adapters::uart)
//! - In-process `mpsc` pipe in [`adapters::loopback`](crate::adapters::loopback)
//!
//! Bytes are assumed to arrive reliably and in order. There is no framing,
//! checksum or length prefix.

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Blocking byte channel.
pub trait Link {
    /// Block until `byte` has been handed to the transmitter.
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError>;

    /// Block until one byte is available and return it.
    fn receive_byte(&mut self) -> Result<u8, LinkError>;
}

impl<L: Link + ?Sized> Link for &mut L {
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        (**self).send_byte(byte)
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        (**self).receive_byte()
    }
}

/// Upper bound applied while waiting for a partner's ready token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WaitPolicy {
    /// Re-read until the token arrives, however long that takes.
    #[default]
    Forever,
    /// Give up after this many non-matching bytes. The bound is checked
    /// after each discard, so `MaxReads(0)` behaves like `MaxReads(1)`.
    MaxReads(u32),
}

impl WaitPolicy {
    /// True once `discarded` non-matching bytes exhaust the bound.
    pub fn exhausted(self, discarded: u32) -> bool {
        match self {
            Self::Forever => false,
            Self::MaxReads(max) => discarded >= max,
        }
    }
}
