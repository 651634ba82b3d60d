//! Outbound node events.
//!
//! The node controllers emit these through the
//! [`EventSink`](super::ports::EventSink) port once per round.

use crate::drivers::duty_cycle::DutyRequest;
use crate::drivers::indicator::TemperatureBand;
use crate::protocol::{NodeRole, Phase, SpeedClass, TemperatureReport};
use crate::sensors::AnalogSample;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    /// Peripherals are up and the cold-start barrier has been passed.
    Started(NodeRole),

    /// Sensing node reported a temperature (phase one).
    TemperatureSent { phase: Phase, report: TemperatureReport },

    /// Actuating node received a temperature (phase one).
    TemperatureReceived {
        phase: Phase,
        report: TemperatureReport,
        sample: AnalogSample,
        band: Option<TemperatureBand>,
    },

    /// Actuating node drove its fan and reported the class (phase two).
    SpeedClassSent {
        phase: Phase,
        request: DutyRequest,
        class: SpeedClass,
    },

    /// Sensing node received a class and switched its fan (phase two).
    SpeedClassReceived {
        phase: Phase,
        class: SpeedClass,
        fan_running: bool,
    },
}
