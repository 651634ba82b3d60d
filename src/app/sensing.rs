//! Sensing node (node A) controller.
//!
//! ```text
//!  TemperaturePort ──▶ ┌──────────────┐ ──▶ Sequencer ──▶ Link
//!    override pin  ──▶ │ SensingNode  │
//!          Actuator ◀──│  phase-owned │ ◀── Sequencer ◀── Link
//!                      └──────────────┘ ──▶ DisplayPort / EventSink
//! ```
//!
//! Every round reads the temperature and refreshes the display, then runs
//! exactly one phase: phase one reports the temperature (or the override
//! request), phase two receives the speed class and switches the local fan.

use embedded_hal::digital::{Error as _, InputPin};
use log::{info, warn};

use crate::config::SystemConfig;
use crate::drivers::duty_cycle::DutyRequest;
use crate::error::{Result, SensorError};
use crate::protocol::link::Link;
use crate::protocol::sequencer::Sequencer;
use crate::protocol::{NodeRole, Phase, SpeedClass, TemperatureReport};

use super::display::temperature_line;
use super::events::NodeEvent;
use super::ports::{Actuator, DisplayPort, EventSink, TemperaturePort};

/// Peripherals owned by the sensing node. Fields are public so firmware and
/// tests can build it directly and inspect it afterwards.
pub struct SensingHardware<T, P, F, D> {
    pub temperature: T,
    pub override_pin: P,
    pub fan: F,
    pub display: D,
}

pub struct SensingNode<L: Link, T, P, F, D> {
    sequencer: Sequencer<L>,
    phase: Phase,
    hw: SensingHardware<T, P, F, D>,
    config: SystemConfig,
}

impl<L, T, P, F, D> SensingNode<L, T, P, F, D>
where
    L: Link,
    T: TemperaturePort,
    P: InputPin,
    F: Actuator,
    D: DisplayPort,
{
    pub fn new(link: L, hw: SensingHardware<T, P, F, D>, config: SystemConfig) -> Self {
        Self {
            sequencer: Sequencer::new(link, NodeRole::Sensing, &config),
            phase: Phase::One,
            hw,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequencer(&self) -> &Sequencer<L> {
        &self.sequencer
    }

    pub fn hw(&self) -> &SensingHardware<T, P, F, D> {
        &self.hw
    }

    pub fn into_parts(self) -> (L, SensingHardware<T, P, F, D>) {
        (self.sequencer.into_link(), self.hw)
    }

    /// Block until the actuating node has announced itself once.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.sequencer.cold_start()?;
        sink.emit(&NodeEvent::Started(NodeRole::Sensing));
        info!("sensing node started");
        Ok(())
    }

    /// One round: sample, display, then one phase step.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let celsius = self.hw.temperature.read_celsius()?;
        self.hw.display.show(0, &temperature_line(celsius));

        let phase = self.phase;
        match phase {
            Phase::One => {
                let report = if self.override_requested()? {
                    TemperatureReport::OverrideRequested
                } else {
                    TemperatureReport::Reading(celsius)
                };
                self.sequencer
                    .send(&mut self.phase, report.to_wire(&self.config.protocol))?;
                sink.emit(&NodeEvent::TemperatureSent { phase, report });
            }
            Phase::Two => {
                let byte = self.sequencer.receive(&mut self.phase)?;
                let class = SpeedClass::from_wire(byte, &self.config.protocol);
                let fan_running = self.apply_class(class)?;
                sink.emit(&NodeEvent::SpeedClassReceived {
                    phase,
                    class,
                    fan_running,
                });
            }
        }
        Ok(())
    }

    /// Run rounds forever. Returns only when a round fails.
    pub fn run(&mut self, sink: &mut impl EventSink) -> Result<()> {
        loop {
            self.step(sink)?;
        }
    }

    fn override_requested(&mut self) -> Result<bool> {
        self.hw.override_pin.is_high().map_err(|e| {
            warn!("sensing: override pin read failed: {:?}", e.kind());
            SensorError::GpioReadFailed.into()
        })
    }

    fn apply_class(&mut self, class: SpeedClass) -> Result<bool> {
        match class {
            SpeedClass::AtOrAboveThreshold => {
                let actuation = &self.config.actuation;
                self.hw.fan.configure(&actuation.timer)?;
                self.hw
                    .fan
                    .drive(DutyRequest::forward(actuation.sensing_fan_magnitude))?;
                Ok(true)
            }
            SpeedClass::BelowThreshold => {
                self.hw.fan.stop()?;
                Ok(false)
            }
        }
    }
}
