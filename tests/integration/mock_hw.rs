//! Mock adapters for integration tests.
//!
//! Every mock records what the node asked of it so tests can assert on the
//! full command history without touching real UART/GPIO/PWM registers.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use fanlink::app::events::NodeEvent;
use fanlink::app::ports::{
    Actuator, AnalogInput, DisplayPort, EventSink, IndicatorPort, TemperaturePort,
};
use fanlink::config::TimerConfig;
use fanlink::drivers::duty_cycle::DutyRequest;
use fanlink::drivers::indicator::TemperatureBand;
use fanlink::error::{ActuatorError, LinkError, SensorError};
use fanlink::protocol::link::Link;
use fanlink::sensors::AnalogSample;

// ── Link ──────────────────────────────────────────────────────

/// Scripted inbound bytes; every outbound byte is recorded. An exhausted
/// script reports `Disconnected` so a test never blocks.
#[derive(Default)]
pub struct MockLink {
    pub inbound: VecDeque<u8>,
    pub outbound: Vec<u8>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn with(bytes: &[u8]) -> Self {
        Self {
            inbound: bytes.iter().copied().collect(),
            outbound: Vec::new(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }
}

impl Link for MockLink {
    fn send_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.outbound.push(byte);
        Ok(())
    }

    fn receive_byte(&mut self) -> Result<u8, LinkError> {
        self.inbound.pop_front().ok_or(LinkError::Disconnected)
    }
}

// ── Fan ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCall {
    Configure(TimerConfig),
    Drive(DutyRequest),
    Stop,
}

#[derive(Default)]
pub struct MockFan {
    pub calls: Vec<FanCall>,
}

#[allow(dead_code)]
impl MockFan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_call(&self) -> Option<&FanCall> {
        self.calls.last()
    }

    /// Whether the most recent drive/stop left the fan turning.
    pub fn running(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                FanCall::Drive(r) => Some(r.magnitude > 0),
                FanCall::Stop => Some(false),
                FanCall::Configure(_) => None,
            })
            .unwrap_or(false)
    }
}

impl Actuator for MockFan {
    fn configure(&mut self, timer: &TimerConfig) -> Result<(), ActuatorError> {
        self.calls.push(FanCall::Configure(*timer));
        Ok(())
    }

    fn drive(&mut self, request: DutyRequest) -> Result<(), ActuatorError> {
        self.calls.push(FanCall::Drive(request));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.calls.push(FanCall::Stop);
        Ok(())
    }
}

// ── Indicators ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockIndicator {
    pub shown: Vec<TemperatureBand>,
}

impl IndicatorPort for MockIndicator {
    fn show_band(&mut self, band: TemperatureBand) -> Result<(), ActuatorError> {
        self.shown.push(band);
        Ok(())
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub rows: [String; 2],
    pub writes: usize,
}

impl DisplayPort for MockDisplay {
    fn show(&mut self, row: u8, text: &str) {
        if let Some(slot) = self.rows.get_mut(row as usize) {
            *slot = text.to_owned();
        }
        self.writes += 1;
    }
}

// ── Sensors ───────────────────────────────────────────────────

/// Constant temperature; counts reads.
pub struct FixedTemperature {
    pub celsius: u8,
    pub reads: usize,
}

impl FixedTemperature {
    pub fn new(celsius: u8) -> Self {
        Self { celsius, reads: 0 }
    }
}

impl TemperaturePort for FixedTemperature {
    fn read_celsius(&mut self) -> Result<u8, SensorError> {
        self.reads += 1;
        Ok(self.celsius)
    }
}

/// Analog input returning a fixed raw value; counts reads.
pub struct FixedAnalog {
    pub raw: u16,
    pub reads: usize,
}

impl FixedAnalog {
    pub fn new(raw: u16) -> Self {
        Self { raw, reads: 0 }
    }
}

impl AnalogInput for FixedAnalog {
    fn read_sample(&mut self) -> Result<AnalogSample, SensorError> {
        self.reads += 1;
        Ok(AnalogSample::new(self.raw))
    }
}

/// Override switch held at a fixed level.
pub struct MockSwitch(pub bool);

impl ErrorType for MockSwitch {
    type Error = Infallible;
}

impl InputPin for MockSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0)
    }
}

// ── EventSink ─────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<NodeEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &NodeEvent) {
        self.events.push(event.clone());
    }
}
