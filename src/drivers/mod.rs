//! Actuator drivers and hardware initialisation.

pub mod duty_cycle;
pub mod hw_init;
pub mod indicator;
