//! Duty-cycle fan driver (L293D-style H-bridge).
//!
//! Variable-speed control via a hardware PWM timer plus two mutually
//! exclusive direction inputs (IN1/IN2):
//!
//! | Direction | IN1  | IN2  |
//! |-----------|------|------|
//! | Stop      | low  | low  |
//! | Forward   | low  | high |
//! | Reverse   | high | low  |
//!
//! The magnitude is written to the compare register unscaled, so callers
//! pass raw 10-bit analog magnitudes and the default timer period (1023)
//! makes `magnitude / period` the active fraction of each cycle.
//!
//! ## Dual-target design
//!
//! Generic over `embedded-hal` 1.0 traits. On ESP-IDF the timer is an LEDC
//! channel and the pins are GPIO outputs (see
//! [`adapters::hardware`](crate::adapters::hardware)); on host/test any
//! mock implementation works.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, info, warn};

use crate::app::ports::Actuator;
use crate::config::TimerConfig;
use crate::error::ActuatorError;

/// A PWM channel whose underlying counter can be started and released.
pub trait PwmTimer: SetDutyCycle {
    /// Start the counter with the given carrier parameters.
    fn start(&mut self, config: &TimerConfig) -> Result<(), Self::Error>;

    /// Disable the counter and free the timer resource.
    fn release(&mut self) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Stop,
    Forward,
    Reverse,
}

impl Direction {
    /// `(IN1, IN2)` levels for this direction.
    pub fn levels(self) -> (PinState, PinState) {
        match self {
            Self::Stop => (PinState::Low, PinState::Low),
            Self::Forward => (PinState::Low, PinState::High),
            Self::Reverse => (PinState::High, PinState::Low),
        }
    }
}

/// Direction + analog-domain magnitude (0..=1023).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DutyRequest {
    pub direction: Direction,
    pub magnitude: u16,
}

impl DutyRequest {
    pub const STOP: Self = Self {
        direction: Direction::Stop,
        magnitude: 0,
    };

    pub fn forward(magnitude: u16) -> Self {
        Self {
            direction: Direction::Forward,
            magnitude,
        }
    }
}

pub struct DutyCycleDriver<T, A, B> {
    pwm: T,
    in1: A,
    in2: B,
    /// `Some` while the timer is started.
    timer: Option<TimerConfig>,
    direction: Direction,
    magnitude: u16,
}

impl<T, A, B> DutyCycleDriver<T, A, B>
where
    T: PwmTimer,
    A: OutputPin,
    B: OutputPin,
{
    /// Wrap the peripherals. Nothing is written until the first command.
    pub fn new(pwm: T, in1: A, in2: B) -> Self {
        Self {
            pwm,
            in1,
            in2,
            timer: None,
            direction: Direction::Stop,
            magnitude: 0,
        }
    }

    pub fn configure(&mut self, config: &TimerConfig) -> Result<(), ActuatorError> {
        match self.timer {
            Some(current) if current == *config => {
                debug!("duty: timer already configured, skipping");
                return Ok(());
            }
            Some(_) if self.is_active() => {
                warn!("duty: refusing to change timer parameters while driving");
                return Err(ActuatorError::ReconfigureWhileActive);
            }
            _ => {}
        }

        self.pwm.start(config).map_err(pwm_error)?;
        self.timer = Some(*config);
        info!(
            "duty: timer started (period={}, carrier={}Hz)",
            config.period_ticks,
            config.carrier_hz()
        );
        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        let (l1, l2) = direction.levels();
        self.in1.set_state(l1).map_err(gpio_error)?;
        self.in2.set_state(l2).map_err(gpio_error)?;
        self.direction = direction;
        Ok(())
    }

    pub fn set_magnitude(&mut self, value: u16) -> Result<(), ActuatorError> {
        if self.timer.is_none() {
            return Err(ActuatorError::TimerNotConfigured);
        }
        let max = self.pwm.max_duty_cycle();
        let duty = if value > max {
            warn!("duty: magnitude {} above timer max {}, clamping", value, max);
            max
        } else {
            value
        };
        self.pwm.set_duty_cycle(duty).map_err(pwm_error)?;
        self.magnitude = duty;
        Ok(())
    }

    /// Latch the direction first so a non-zero magnitude never runs with a
    /// stale direction.
    pub fn drive(&mut self, request: DutyRequest) -> Result<(), ActuatorError> {
        self.set_direction(request.direction)?;
        self.set_magnitude(request.magnitude)
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set_direction(Direction::Stop)?;
        if self.timer.is_some() {
            self.pwm.set_duty_cycle(0).map_err(pwm_error)?;
            self.pwm.release().map_err(pwm_error)?;
            self.timer = None;
            info!("duty: stopped, timer released");
        }
        self.magnitude = 0;
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn magnitude(&self) -> u16 {
        self.magnitude
    }

    pub fn is_configured(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.direction != Direction::Stop || self.magnitude > 0
    }

    pub fn pwm(&self) -> &T {
        &self.pwm
    }
}

impl<T, A, B> Actuator for DutyCycleDriver<T, A, B>
where
    T: PwmTimer,
    A: OutputPin,
    B: OutputPin,
{
    fn configure(&mut self, timer: &TimerConfig) -> Result<(), ActuatorError> {
        DutyCycleDriver::configure(self, timer)
    }

    fn drive(&mut self, request: DutyRequest) -> Result<(), ActuatorError> {
        DutyCycleDriver::drive(self, request)
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        DutyCycleDriver::stop(self)
    }
}

fn pwm_error<E: embedded_hal::pwm::Error>(e: E) -> ActuatorError {
    warn!("duty: PWM error {:?}", e.kind());
    ActuatorError::PwmWriteFailed
}

fn gpio_error<E: embedded_hal::digital::Error>(e: E) -> ActuatorError {
    warn!("duty: GPIO error {:?}", e.kind());
    ActuatorError::GpioWriteFailed
}
