//! Actuating node (node B) controller.
//!
//! Phase one receives the temperature report, samples the potentiometer and
//! lights the band indicator. Phase two drives the fan with the sample as
//! its magnitude and reports the speed class back. The display shows the
//! last sample at the top of every round.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::drivers::duty_cycle::DutyRequest;
use crate::drivers::indicator::TemperatureBand;
use crate::error::Result;
use crate::protocol::link::Link;
use crate::protocol::sequencer::Sequencer;
use crate::protocol::{NodeRole, Phase, SpeedClass, TemperatureReport};
use crate::sensors::AnalogSample;

use super::display::{SAMPLE_CAPTION, sample_line};
use super::events::NodeEvent;
use super::ports::{Actuator, AnalogInput, DisplayPort, EventSink, IndicatorPort};

/// Peripherals owned by the actuating node.
pub struct ActuatingHardware<A, I, F, D> {
    pub analog: A,
    pub indicators: I,
    pub fan: F,
    pub display: D,
}

pub struct ActuatingNode<L: Link, A, I, F, D> {
    sequencer: Sequencer<L>,
    phase: Phase,
    sample: AnalogSample,
    hw: ActuatingHardware<A, I, F, D>,
    config: SystemConfig,
}

impl<L, A, I, F, D> ActuatingNode<L, A, I, F, D>
where
    L: Link,
    A: AnalogInput,
    I: IndicatorPort,
    F: Actuator,
    D: DisplayPort,
{
    pub fn new(link: L, hw: ActuatingHardware<A, I, F, D>, config: SystemConfig) -> Self {
        Self {
            sequencer: Sequencer::new(link, NodeRole::Actuating, &config),
            phase: Phase::One,
            sample: AnalogSample::new(0),
            hw,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last sample: the ADC value, or the override magnitude.
    pub fn sample(&self) -> AnalogSample {
        self.sample
    }

    pub fn sequencer(&self) -> &Sequencer<L> {
        &self.sequencer
    }

    pub fn hw(&self) -> &ActuatingHardware<A, I, F, D> {
        &self.hw
    }

    pub fn into_parts(self) -> (L, ActuatingHardware<A, I, F, D>) {
        (self.sequencer.into_link(), self.hw)
    }

    /// Start the fan timer, then announce readiness to the sensing node.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.hw.fan.configure(&self.config.actuation.timer)?;
        self.hw.display.show(0, SAMPLE_CAPTION);
        self.sequencer.cold_start()?;
        sink.emit(&NodeEvent::Started(NodeRole::Actuating));
        info!("actuating node started");
        Ok(())
    }

    /// One round: display the current sample, then one phase step.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.hw.display.show(1, &sample_line(self.sample));

        let phase = self.phase;
        match phase {
            Phase::One => {
                let byte = self.sequencer.receive(&mut self.phase)?;
                let report = TemperatureReport::from_wire(byte, &self.config.protocol);
                let band = self.apply_report(report)?;
                sink.emit(&NodeEvent::TemperatureReceived {
                    phase,
                    report,
                    sample: self.sample,
                    band,
                });
            }
            Phase::Two => {
                let request = DutyRequest::forward(self.sample.value());
                self.hw.fan.drive(request)?;
                let class = SpeedClass::classify(self.sample, &self.config.thresholds);
                self.sequencer
                    .send(&mut self.phase, class.to_wire(&self.config.protocol))?;
                sink.emit(&NodeEvent::SpeedClassSent {
                    phase,
                    request,
                    class,
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

    /// Update the sample and indicators. Override leaves the indicators as
    /// they were and skips the ADC.
    fn apply_report(&mut self, report: TemperatureReport) -> Result<Option<TemperatureBand>> {
        match report {
            TemperatureReport::OverrideRequested => {
                self.sample = AnalogSample::new(self.config.thresholds.override_magnitude);
                debug!("actuating: override, sample forced to {}", self.sample.value());
                Ok(None)
            }
            TemperatureReport::Reading(celsius) => {
                self.sample = self.hw.analog.read_sample()?;
                let band = TemperatureBand::classify(celsius, &self.config.thresholds);
                self.hw.indicators.show_band(band)?;
                Ok(Some(band))
            }
        }
    }
}
