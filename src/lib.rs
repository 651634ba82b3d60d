//! FanLink firmware library.
//!
//! Two nodes share one UART and stay in lock-step: the sensing node reports
//! a temperature, the actuating node answers with a fan speed class. This
//! library holds the protocol, both node controllers and their drivers.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; the host build runs against simulated peripherals.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod protocol;
pub mod sensors;
