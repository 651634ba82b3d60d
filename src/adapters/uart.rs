//! UART link adapter.
//!
//! Implements [`Link`] over the node-to-node UART configured by
//! [`hw_init::init_peripherals`]. Both calls block: transmit until the byte
//! has left the FIFO, receive until a byte arrives.

use log::trace;

use crate::drivers::hw_init;
use crate::error::LinkError;
use crate::protocol::link::Link;

pub struct UartLink {
    _private: (),
}

impl UartLink {
    /// The UART driver must already be installed.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for UartLink {
    fn default() -> Self {
        Self::new()
    }
}

impl Link for UartLink {
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        trace!("uart: tx 0x{:02x}", byte);
        hw_init::uart_write(byte).map_err(LinkError::Driver)
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        let byte = hw_init::uart_read().map_err(LinkError::Driver)?;
        trace!("uart: rx 0x{:02x}", byte);
        Ok(byte)
    }
}
