//! LM35 precision temperature sensor (10 mV/°C, 0–150 °C).
//!
//! The conversion is `sample * full_scale_mv / (1023 * 10)` °C. The full
//! scale defaults to a 2.56 V reference (one LSB = 2.5 mV); boards whose ADC
//! spans a different range pass theirs to [`Lm35::with_full_scale`].
//!
//! ## Dual-target design
//!
//! The sensor is generic over [`AnalogInput`]; on ESP-IDF that is an
//! [`AdcChannel`](crate::adapters::hardware::AdcChannel), on host/test any
//! mock returning canned samples.

use crate::app::ports::{AnalogInput, TemperaturePort};
use crate::config::consts::ANALOG_FULL_SCALE;
use crate::error::SensorError;
use crate::sensors::AnalogSample;

/// Analog full scale of a 2.56 V reference, in mV.
pub const DEFAULT_FULL_SCALE_MV: u32 = 2560;
const MV_PER_DEGREE: u32 = 10;
/// Upper end of the LM35's rated range.
const MAX_CELSIUS: u8 = 150;

pub struct Lm35<A> {
    adc: A,
    full_scale_mv: u32,
}

impl<A: AnalogInput> Lm35<A> {
    pub fn new(adc: A) -> Self {
        Self::with_full_scale(adc, DEFAULT_FULL_SCALE_MV)
    }

    /// `full_scale_mv` is the input voltage that reads as sample 1023.
    pub fn with_full_scale(adc: A, full_scale_mv: u32) -> Self {
        Self { adc, full_scale_mv }
    }

    pub fn sample_to_celsius(sample: AnalogSample, full_scale_mv: u32) -> u8 {
        let mv = u32::from(sample.value()) * full_scale_mv / u32::from(ANALOG_FULL_SCALE);
        let celsius = mv / MV_PER_DEGREE;
        celsius.min(u32::from(MAX_CELSIUS)) as u8
    }
}

impl<A: AnalogInput> TemperaturePort for Lm35<A> {
    fn read_celsius(&mut self) -> Result<u8, SensorError> {
        let sample = self.adc.read_sample()?;
        Ok(Self::sample_to_celsius(sample, self.full_scale_mv))
    }
}
