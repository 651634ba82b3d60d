//! Handshake sequencer: the per-round ready/ready/payload exchange.
//!
//! Both nodes run the same sequencer with complementary [`NodeRole`]s. A
//! round is one [`Phase`]: the sender emits its token, waits for the
//! partner's token, then emits the payload; the receiver waits for the
//! partner's token, emits its own, then reads the payload. The phase is
//! owned by the caller and advanced here only when the round completes.
//!
//! ## Failure semantics
//!
//! A dropped or corrupted byte leaves at least one node waiting forever.
//! That is the production contract. A bounded [`WaitPolicy`] exists for test
//! harnesses and turns the stall into [`LinkError::WaitExhausted`].

use log::{debug, info};

use crate::config::{ProtocolConfig, SystemConfig};
use crate::error::LinkError;

use super::link::{Link, WaitPolicy};
use super::{NodeRole, Phase, ReadyToken, Transfer};

/// Diagnostic counters. They never influence protocol behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequencerStats {
    /// Rounds completed (one per phase step).
    pub rounds: u64,
    /// Bytes discarded while waiting for a partner token.
    pub discarded: u64,
}

pub struct Sequencer<L: Link> {
    link: L,
    role: NodeRole,
    protocol: ProtocolConfig,
    wait: WaitPolicy,
    stats: SequencerStats,
}

impl<L: Link> Sequencer<L> {
    pub fn new(link: L, role: NodeRole, config: &SystemConfig) -> Self {
        Self {
            link,
            role,
            protocol: config.protocol,
            wait: config.link.wait,
            stats: SequencerStats::default(),
        }
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn stats(&self) -> SequencerStats {
        self.stats
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn into_link(self) -> L {
        self.link
    }

    /// Cold-start barrier.
    ///
    /// The actuating node announces its token once after its own peripheral
    /// setup; the sensing node blocks until it has seen that token once.
    pub fn cold_start(&mut self) -> Result<(), LinkError> {
        match self.role {
            NodeRole::Actuating => {
                self.emit_token(self.role.own_token())?;
                info!("sequencer: announced ready to sensing node");
            }
            NodeRole::Sensing => {
                self.wait_for(self.role.partner_token())?;
                info!("sequencer: actuating node is ready");
            }
        }
        Ok(())
    }

    /// Run a sending round: own token, wait for partner, payload, advance.
    pub fn send(&mut self, phase: &mut Phase, payload: u8) -> Result<(), LinkError> {
        debug_assert_eq!(self.role.transfer(*phase), Transfer::Send);

        self.emit_token(self.role.own_token())?;
        self.wait_for(self.role.partner_token())?;
        self.link.send_byte(payload)?;
        debug!("sequencer: {:?} sent payload {}", phase, payload);

        self.finish_round(phase);
        Ok(())
    }

    /// Run a receiving round: wait for partner, own token, payload, advance.
    pub fn receive(&mut self, phase: &mut Phase) -> Result<u8, LinkError> {
        debug_assert_eq!(self.role.transfer(*phase), Transfer::Receive);

        self.wait_for(self.role.partner_token())?;
        self.emit_token(self.role.own_token())?;
        let payload = self.link.receive_byte()?;
        debug!("sequencer: {:?} received payload {}", phase, payload);

        self.finish_round(phase);
        Ok(payload)
    }

    fn finish_round(&mut self, phase: &mut Phase) {
        phase.advance();
        self.stats.rounds = self.stats.rounds.wrapping_add(1);
    }

    fn emit_token(&mut self, token: ReadyToken) -> Result<(), LinkError> {
        self.link.send_byte(token.to_wire(&self.protocol))
    }

    /// Re-read the link until the exact `token` byte arrives.
    fn wait_for(&mut self, token: ReadyToken) -> Result<(), LinkError> {
        let expected = token.to_wire(&self.protocol);
        let mut discarded: u32 = 0;
        loop {
            let byte = self.link.receive_byte()?;
            if byte == expected {
                return Ok(());
            }
            discarded = discarded.saturating_add(1);
            self.stats.discarded = self.stats.discarded.wrapping_add(1);
            debug!("sequencer: discarded 0x{:02x} waiting for {:?}", byte, token);
            if self.wait.exhausted(discarded) {
                return Err(LinkError::WaitExhausted {
                    expected: token,
                    discarded,
                });
            }
        }
    }
}
