//! Two-node lock-step protocol.
//!
//! ```text
//!   sensing node (A)                         actuating node (B)
//!   ───────────────                          ──────────────────
//!                      ◀──── B_READY ────    cold start (once)
//!   Phase::One  send   ──── A_READY ────▶    Phase::One  receive
//!                      ◀──── B_READY ────
//!                      ──── temperature ─▶
//!   Phase::Two  recv   ◀──── B_READY ────    Phase::Two  send
//!                      ──── A_READY ────▶
//!                      ◀──── speed class ─
//! ```
//!
//! The sender of a phase always speaks first; the receiver always listens
//! first. Payloads are tagged values inside the crate and only become the
//! reserved wire bytes at the link boundary.

pub mod link;
pub mod sequencer;

use crate::config::{ProtocolConfig, ThresholdConfig};
use crate::sensors::AnalogSample;

// ---------------------------------------------------------------------------
// Ready tokens and roles
// ---------------------------------------------------------------------------

/// Handshake byte identifying which node signalled readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyToken {
    NodeA,
    NodeB,
}

impl ReadyToken {
    pub fn to_wire(self, cfg: &ProtocolConfig) -> u8 {
        match self {
            Self::NodeA => cfg.node_a_ready,
            Self::NodeB => cfg.node_b_ready,
        }
    }
}

/// Which side of the link this node plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Node A: temperature sensor + override switch.
    Sensing,
    /// Node B: potentiometer, indicators, variable-speed fan.
    Actuating,
}

impl NodeRole {
    pub fn own_token(self) -> ReadyToken {
        match self {
            Self::Sensing => ReadyToken::NodeA,
            Self::Actuating => ReadyToken::NodeB,
        }
    }

    pub fn partner_token(self) -> ReadyToken {
        match self {
            Self::Sensing => ReadyToken::NodeB,
            Self::Actuating => ReadyToken::NodeA,
        }
    }

    /// Whether this node sends or receives the payload of `phase`.
    pub fn transfer(self, phase: Phase) -> Transfer {
        match (self, phase) {
            (Self::Sensing, Phase::One) | (Self::Actuating, Phase::Two) => Transfer::Send,
            (Self::Sensing, Phase::Two) | (Self::Actuating, Phase::One) => Transfer::Receive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Send,
    Receive,
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Two-state protocol cycle: One → Two → One → …
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    One,
    Two,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub fn advance(&mut self) {
        *self = self.next();
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Phase-one payload, sensing → actuating.
///
/// A genuine reading equal to the override sentinel is indistinguishable on
/// the wire and decodes as [`TemperatureReport::OverrideRequested`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureReport {
    /// Measured temperature in °C.
    Reading(u8),
    /// Manual override asserted: force minimum actuation.
    OverrideRequested,
}

impl TemperatureReport {
    pub fn to_wire(self, cfg: &ProtocolConfig) -> u8 {
        match self {
            Self::Reading(celsius) => celsius,
            Self::OverrideRequested => cfg.override_sentinel,
        }
    }

    pub fn from_wire(byte: u8, cfg: &ProtocolConfig) -> Self {
        if byte == cfg.override_sentinel {
            Self::OverrideRequested
        } else {
            Self::Reading(byte)
        }
    }
}

/// Phase-two payload, actuating → sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    BelowThreshold,
    AtOrAboveThreshold,
}

impl SpeedClass {
    pub fn classify(sample: AnalogSample, thresholds: &ThresholdConfig) -> Self {
        if sample.value() >= thresholds.speed_threshold {
            Self::AtOrAboveThreshold
        } else {
            Self::BelowThreshold
        }
    }

    pub fn to_wire(self, cfg: &ProtocolConfig) -> u8 {
        match self {
            Self::BelowThreshold => cfg.speed_class_low,
            Self::AtOrAboveThreshold => cfg.speed_class_high,
        }
    }

    /// Only the exact high byte counts as high; anything else is low.
    pub fn from_wire(byte: u8, cfg: &ProtocolConfig) -> Self {
        if byte == cfg.speed_class_high {
            Self::AtOrAboveThreshold
        } else {
            Self::BelowThreshold
        }
    }
}
