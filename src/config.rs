//! System configuration parameters
//!
//! Every reserved wire value and threshold used by the two nodes lives here.
//! Both nodes must run with identical [`ProtocolConfig`] values or the
//! handshake never completes.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::protocol::link::WaitPolicy;

/// Reserved protocol values and thresholds, byte-identical to the wire format
/// spoken by the deployed controllers.
pub mod consts {
    /// Ready token emitted by the sensing node (node A).
    pub const NODE_A_READY: u8 = 0x01;
    /// Ready token emitted by the actuating node (node B).
    pub const NODE_B_READY: u8 = 0x02;

    /// Temperature byte meaning "manual override: force minimum actuation".
    pub const OVERRIDE_SENTINEL: u8 = 200;
    /// Speed-class byte for "fan at/above threshold".
    pub const SPEED_CLASS_HIGH: u8 = 70;
    /// Speed-class byte for "fan below threshold".
    pub const SPEED_CLASS_LOW: u8 = 0;

    /// 10-bit analog full scale.
    pub const ANALOG_FULL_SCALE: u16 = 1023;
    /// Forced analog sample on override (25 % of full scale).
    pub const OVERRIDE_MAGNITUDE: u16 = 256;
    /// Sample at/above which the fan counts as fast (~70 % of full scale).
    pub const SPEED_THRESHOLD: u16 = 716;

    /// Lowest temperature (°C) of the mid band.
    pub const BAND_MID_C: u8 = 20;
    /// Lowest temperature (°C) of the high band.
    pub const BAND_HIGH_C: u8 = 40;

    /// Magnitude the sensing node drives its own fan at. Not rescaled: with
    /// the 1023-tick timer this is about 10 % duty, not full speed.
    pub const SENSING_FAN_MAGNITUDE: u16 = 100;
}

/// Reserved bytes exchanged on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub node_a_ready: u8,
    pub node_b_ready: u8,
    pub override_sentinel: u8,
    pub speed_class_high: u8,
    pub speed_class_low: u8,
}

/// Decision thresholds applied by the actuating node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Band boundary: readings below this are "low".
    pub band_mid_c: u8,
    /// Band boundary: readings at/above this are "high".
    pub band_high_c: u8,
    /// Analog sample at/above which the speed class is high.
    pub speed_threshold: u16,
    /// Analog sample forced when an override is received.
    pub override_magnitude: u16,
}

/// Timer prescaler applied to the PWM clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }
}

/// PWM carrier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Counter TOP value; duty resolution is `period_ticks + 1` steps.
    pub period_ticks: u16,
    pub prescaler: Prescaler,
    /// Timer input clock in Hz.
    pub clock_hz: u32,
}

impl TimerConfig {
    /// Resulting PWM carrier frequency (integer Hz, rounded down).
    pub fn carrier_hz(&self) -> u32 {
        self.clock_hz / self.prescaler.divisor() / (u32::from(self.period_ticks) + 1)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        // 10-bit fast PWM, clk/8 from an 8 MHz core clock.
        Self {
            period_ticks: consts::ANALOG_FULL_SCALE,
            prescaler: Prescaler::Div8,
            clock_hz: 8_000_000,
        }
    }
}

/// Fan actuation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuationConfig {
    pub timer: TimerConfig,
    /// Fixed magnitude the sensing node drives its fan at on a high class.
    pub sensing_fan_magnitude: u16,
}

/// Serial link parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub baud_rate: u32,
    /// Upper bound on a wait-for-token loop. `Forever` in production.
    pub wait: WaitPolicy,
}

/// Complete per-node configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub protocol: ProtocolConfig,
    pub thresholds: ThresholdConfig,
    pub actuation: ActuationConfig,
    pub link: LinkConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolConfig {
                node_a_ready: consts::NODE_A_READY,
                node_b_ready: consts::NODE_B_READY,
                override_sentinel: consts::OVERRIDE_SENTINEL,
                speed_class_high: consts::SPEED_CLASS_HIGH,
                speed_class_low: consts::SPEED_CLASS_LOW,
            },
            thresholds: ThresholdConfig {
                band_mid_c: consts::BAND_MID_C,
                band_high_c: consts::BAND_HIGH_C,
                speed_threshold: consts::SPEED_THRESHOLD,
                override_magnitude: consts::OVERRIDE_MAGNITUDE,
            },
            actuation: ActuationConfig {
                timer: TimerConfig::default(),
                sensing_fan_magnitude: consts::SENSING_FAN_MAGNITUDE,
            },
            link: LinkConfig {
                baud_rate: 9600,
                wait: WaitPolicy::Forever,
            },
        }
    }
}

impl SystemConfig {
    /// Reject configurations that would break the handshake or the
    /// analog-domain arithmetic.
    pub fn validate(&self) -> Result<(), Error> {
        let p = &self.protocol;
        if p.node_a_ready == p.node_b_ready {
            return Err(Error::Config("ready tokens must differ"));
        }
        if p.speed_class_high == p.speed_class_low {
            return Err(Error::Config("speed-class bytes must differ"));
        }
        let t = &self.thresholds;
        if t.band_mid_c >= t.band_high_c {
            return Err(Error::Config("band_mid_c must be below band_high_c"));
        }
        if t.speed_threshold > consts::ANALOG_FULL_SCALE {
            return Err(Error::Config("speed_threshold exceeds analog full scale"));
        }
        if t.override_magnitude > consts::ANALOG_FULL_SCALE {
            return Err(Error::Config("override_magnitude exceeds analog full scale"));
        }
        let a = &self.actuation;
        if a.timer.period_ticks == 0 {
            return Err(Error::Config("timer period must be non-zero"));
        }
        if a.sensing_fan_magnitude > a.timer.period_ticks {
            return Err(Error::Config("sensing_fan_magnitude exceeds timer period"));
        }
        if self.link.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration blob.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_slice(bytes).map_err(|_| Error::Config("malformed JSON config"))?;
        config.validate()?;
        Ok(config)
    }
}
