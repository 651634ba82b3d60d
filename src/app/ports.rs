//! Port traits: the boundary between the node controllers and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SensingNode / ActuatingNode
//! ```
//!
//! Driven adapters (ADC, fan driver, indicators, display, event sinks)
//! implement these traits. The controllers consume them via generics, so
//! the control logic never touches hardware directly. Digital inputs use
//! `embedded_hal::digital::InputPin` directly and the link uses
//! [`Link`](crate::protocol::link::Link).

use crate::config::TimerConfig;
use crate::drivers::duty_cycle::DutyRequest;
use crate::drivers::indicator::TemperatureBand;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::AnalogSample;

// ───────────────────────────────────────────────────────────────
// Sensor ports (hardware → controller)
// ───────────────────────────────────────────────────────────────

/// A 10-bit analog input channel, already configured.
pub trait AnalogInput {
    fn read_sample(&mut self) -> Result<AnalogSample, SensorError>;
}

/// Anything that yields a temperature in whole °C.
pub trait TemperaturePort {
    fn read_celsius(&mut self) -> Result<u8, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (controller → hardware)
// ───────────────────────────────────────────────────────────────

/// Variable-speed fan behind a duty-cycle driver.
pub trait Actuator {
    /// Start the PWM carrier. Idempotent for identical parameters.
    fn configure(&mut self, timer: &TimerConfig) -> Result<(), ActuatorError>;

    /// Latch the direction, then commit the magnitude.
    fn drive(&mut self, request: DutyRequest) -> Result<(), ActuatorError>;

    /// Direction Stop, magnitude 0, release the timer. Idempotent.
    fn stop(&mut self) -> Result<(), ActuatorError>;
}

/// Three one-hot temperature band indicators.
pub trait IndicatorPort {
    fn show_band(&mut self, band: TemperatureBand) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Output-only ports (controller → operator)
// ───────────────────────────────────────────────────────────────

/// Character display. Output only; nothing flows back into the protocol.
pub trait DisplayPort {
    fn show(&mut self, row: u8, text: &str);
}

/// Controllers emit structured [`NodeEvent`](super::events::NodeEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::NodeEvent);
}
