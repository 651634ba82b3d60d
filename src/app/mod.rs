//! Application core: the two node controllers and their ports.
//!
//! Controllers own a [`Sequencer`](crate::protocol::sequencer::Sequencer)
//! and reach every peripheral through the traits in [`ports`], so the whole
//! protocol runs against mock adapters on the host.

pub mod actuating;
pub mod display;
pub mod events;
pub mod ports;
pub mod sensing;
