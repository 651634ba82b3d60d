//! Fuzz target: `Sequencer` under arbitrary inbound traffic
//!
//! The first byte picks the role, the rest is the partner's byte stream.
//! The sequencer must never panic, must only ever transmit its own token or
//! a payload, and must never advance the phase on a failed round.
//!
//! cargo fuzz run fuzz_handshake

#![no_main]

use std::collections::VecDeque;

use fanlink::config::SystemConfig;
use fanlink::error::LinkError;
use fanlink::protocol::link::{Link, WaitPolicy};
use fanlink::protocol::sequencer::Sequencer;
use fanlink::protocol::{NodeRole, Phase, Transfer};
use libfuzzer_sys::fuzz_target;

struct FuzzLink {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
}

impl Link for FuzzLink {
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.outbound.push(byte);
        Ok(())
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        self.inbound.pop_front().ok_or(LinkError::Disconnected)
    }
}

const PAYLOAD: u8 = 0xA5;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, stream)) = data.split_first() else {
        return;
    };
    let role = if selector & 1 == 0 {
        NodeRole::Sensing
    } else {
        NodeRole::Actuating
    };

    let mut config = SystemConfig::default();
    config.link.wait = WaitPolicy::MaxReads(64);
    let link = FuzzLink {
        inbound: stream.iter().copied().collect(),
        outbound: Vec::new(),
    };
    let mut seq = Sequencer::new(link, role, &config);
    if seq.cold_start().is_err() {
        return;
    }

    let mut phase = Phase::One;
    loop {
        let before = phase;
        let result = match role.transfer(phase) {
            Transfer::Send => seq.send(&mut phase, PAYLOAD).map(|_| ()),
            Transfer::Receive => seq.receive(&mut phase).map(|_| ()),
        };
        if result.is_err() {
            assert_eq!(phase, before, "failed round advanced the phase");
            break;
        }
        assert_eq!(phase, before.next());
    }

    let own = role.own_token().to_wire(&config.protocol);
    assert!(
        seq.link().outbound.iter().all(|b| *b == own || *b == PAYLOAD),
        "transmitted something other than own token or payload"
    );
});
