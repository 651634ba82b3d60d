//! Temperature band indicator: three discrete LEDs, exactly one lit.
//!
//! Green = low (< 20 °C), yellow = mid (20–39 °C), red = high (>= 40 °C).

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::IndicatorPort;
use crate::config::ThresholdConfig;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    Low,
    Mid,
    High,
}

impl TemperatureBand {
    pub fn classify(celsius: u8, thresholds: &ThresholdConfig) -> Self {
        if celsius < thresholds.band_mid_c {
            Self::Low
        } else if celsius < thresholds.band_high_c {
            Self::Mid
        } else {
            Self::High
        }
    }
}

pub struct BandIndicator<G, Y, R> {
    green: G,
    yellow: Y,
    red: R,
    current: Option<TemperatureBand>,
}

impl<G: OutputPin, Y: OutputPin, R: OutputPin> BandIndicator<G, Y, R> {
    pub fn new(green: G, yellow: Y, red: R) -> Self {
        Self {
            green,
            yellow,
            red,
            current: None,
        }
    }

    pub fn show(&mut self, band: TemperatureBand) -> Result<(), ActuatorError> {
        let lit = |b| PinState::from(band == b);
        self.green
            .set_state(lit(TemperatureBand::Low))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.yellow
            .set_state(lit(TemperatureBand::Mid))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.red
            .set_state(lit(TemperatureBand::High))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.current = Some(band);
        Ok(())
    }

    pub fn current_band(&self) -> Option<TemperatureBand> {
        self.current
    }
}

impl<G: OutputPin, Y: OutputPin, R: OutputPin> IndicatorPort for BandIndicator<G, Y, R> {
    fn show_band(&mut self, band: TemperatureBand) -> Result<(), ActuatorError> {
        self.show(band)
    }
}
