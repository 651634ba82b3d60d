//! Actuating node (node B) firmware entry point.
//!
//! ```text
//!   potentiometer ──▶ ADC1 ─┐
//!   band LEDs ◀─────────────┤◀── ActuatingNode ◀──▶ UART1 ◀──▶ sensing node
//!   fan (LEDC + IN1/IN2) ◀──┘        │
//!                                    └──▶ LogDisplay / LogEventSink
//! ```

use anyhow::Result;
use log::{error, info};

use fanlink::adapters::display::LogDisplay;
use fanlink::adapters::hardware::{AdcChannel, GpioOutput, LedcFanPwm};
use fanlink::adapters::log_sink::LogEventSink;
use fanlink::adapters::uart::UartLink;
use fanlink::app::actuating::{ActuatingHardware, ActuatingNode};
use fanlink::config::SystemConfig;
use fanlink::drivers::duty_cycle::DutyCycleDriver;
use fanlink::drivers::hw_init;
use fanlink::drivers::indicator::BandIndicator;
use fanlink::error::Error;
use fanlink::pins;
use fanlink::protocol::NodeRole;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FanLink actuating node v{}       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(NodeRole::Actuating, config.link.baud_rate) {
        error!("HAL init failed: {} - halting", e);
        return Err(Error::from(e).into());
    }

    // ── 3. Adapters + node ────────────────────────────────────
    let hw = ActuatingHardware {
        analog: AdcChannel::new(pins::ANALOG_ADC1_CHANNEL, pins::ADC_RESOLUTION_BITS),
        indicators: BandIndicator::new(
            GpioOutput::new(pins::LED_GREEN_GPIO),
            GpioOutput::new(pins::LED_YELLOW_GPIO),
            GpioOutput::new(pins::LED_RED_GPIO),
        ),
        fan: DutyCycleDriver::new(
            LedcFanPwm::new(),
            GpioOutput::new(pins::FAN_IN1_GPIO),
            GpioOutput::new(pins::FAN_IN2_GPIO),
        ),
        display: LogDisplay::new(),
    };
    let mut node = ActuatingNode::new(UartLink::new(), hw, config);
    let mut sink = LogEventSink::new();

    // ── 4. Lock-step loop (blocks on the link) ────────────────
    node.start(&mut sink)?;
    if let Err(e) = node.run(&mut sink) {
        error!("actuating node halted: {}", e);
        return Err(e.into());
    }
    Ok(())
}
