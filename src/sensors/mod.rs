//! Sensor subsystem: analog sample type and the temperature sensor driver.

pub mod temperature;

use crate::config::consts::ANALOG_FULL_SCALE;

/// A 10-bit analog magnitude (0..=1023).
///
/// Drives both the displayed value and, unchanged, the PWM compare input of
/// the actuating node's fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnalogSample(u16);

impl AnalogSample {
    pub const FULL_SCALE: Self = Self(ANALOG_FULL_SCALE);

    /// Build a sample, clamping anything above full scale.
    pub fn new(raw: u16) -> Self {
        Self(raw.min(ANALOG_FULL_SCALE))
    }

    /// Reduce a reading of arbitrary resolution to 10 bits.
    pub fn from_resolution(raw: u16, bits: u8) -> Self {
        match bits {
            0..=10 => Self::new(raw << (10 - u32::from(bits))),
            _ => Self::new(raw.checked_shr(u32::from(bits - 10)).unwrap_or(0)),
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl From<AnalogSample> for u16 {
    fn from(s: AnalogSample) -> Self {
        s.0
    }
}
