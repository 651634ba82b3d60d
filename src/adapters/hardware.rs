//! Hardware adapter: bridges real peripherals to the crate's port traits.
//!
//! Wraps the raw [`hw_init`] accessors in `embedded-hal` 1.0 pin/PWM types
//! and the [`AnalogInput`] port. This is the only module besides `hw_init`
//! that knows pin numbers at runtime. On non-espidf targets `hw_init` falls
//! back to its simulation stubs, so everything here works on the host too.

use core::convert::Infallible;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::app::ports::AnalogInput;
use crate::config::TimerConfig;
use crate::drivers::duty_cycle::PwmTimer;
use crate::drivers::hw_init;
use crate::error::SensorError;
use crate::sensors::AnalogSample;

/// ESP-IDF error code surfaced through the `embedded-hal` error traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EspError(pub i32);

impl pwm::Error for EspError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl digital::Error for EspError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

// ── Analog ────────────────────────────────────────────────────

/// One ADC1 channel, reduced to a 10-bit [`AnalogSample`].
pub struct AdcChannel {
    channel: u32,
    resolution_bits: u8,
}

impl AdcChannel {
    pub fn new(channel: u32, resolution_bits: u8) -> Self {
        Self {
            channel,
            resolution_bits,
        }
    }
}

impl AnalogInput for AdcChannel {
    fn read_sample(&mut self) -> Result<AnalogSample, SensorError> {
        let raw = hw_init::adc1_read(self.channel).map_err(|rc| {
            log::warn!("adc: CH{} read failed (rc={})", self.channel, rc);
            SensorError::AdcReadFailed
        })?;
        Ok(AnalogSample::from_resolution(raw, self.resolution_bits))
    }
}

// ── Digital ───────────────────────────────────────────────────

pub struct GpioInput(i32);

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self(gpio)
    }
}

impl digital::ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.0))
    }
}

pub struct GpioOutput(i32);

impl GpioOutput {
    pub fn new(gpio: i32) -> Self {
        Self(gpio)
    }
}

impl digital::ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.0, true);
        Ok(())
    }
}

// ── PWM ───────────────────────────────────────────────────────

/// The fan's LEDC channel. `max_duty_cycle` follows the configured period.
pub struct LedcFanPwm {
    period_ticks: u16,
}

impl LedcFanPwm {
    pub fn new() -> Self {
        Self {
            period_ticks: TimerConfig::default().period_ticks,
        }
    }
}

impl Default for LedcFanPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl pwm::ErrorType for LedcFanPwm {
    type Error = EspError;
}

impl SetDutyCycle for LedcFanPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.period_ticks
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), EspError> {
        hw_init::ledc_set(duty).map_err(EspError)
    }
}

impl PwmTimer for LedcFanPwm {
    fn start(&mut self, config: &TimerConfig) -> Result<(), EspError> {
        hw_init::ledc_start(config).map_err(EspError)?;
        self.period_ticks = config.period_ticks;
        Ok(())
    }

    fn release(&mut self) -> Result<(), EspError> {
        hw_init::ledc_release().map_err(EspError)
    }
}
