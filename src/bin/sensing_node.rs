//! Sensing node (node A) firmware entry point.
//!
//! ```text
//!   LM35 ──▶ ADC1 ─┐
//!   override SW ───┤──▶ SensingNode ──▶ UART1 ──▶ actuating node
//!   demo fan ◀─────┘        │
//!                           └──▶ LogDisplay / LogEventSink
//! ```

use anyhow::Result;
use log::{error, info};

use fanlink::adapters::display::LogDisplay;
use fanlink::adapters::hardware::{AdcChannel, GpioInput, GpioOutput, LedcFanPwm};
use fanlink::adapters::log_sink::LogEventSink;
use fanlink::adapters::uart::UartLink;
use fanlink::app::sensing::{SensingHardware, SensingNode};
use fanlink::config::SystemConfig;
use fanlink::drivers::duty_cycle::DutyCycleDriver;
use fanlink::drivers::hw_init;
use fanlink::error::Error;
use fanlink::pins;
use fanlink::protocol::NodeRole;
use fanlink::sensors::temperature::Lm35;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FanLink sensing node v{}         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals(NodeRole::Sensing, config.link.baud_rate) {
        error!("HAL init failed: {} - halting", e);
        return Err(Error::from(e).into());
    }

    // ── 3. Adapters + node ────────────────────────────────────
    let hw = SensingHardware {
        temperature: Lm35::with_full_scale(
            AdcChannel::new(pins::ANALOG_ADC1_CHANNEL, pins::ADC_RESOLUTION_BITS),
            hw_init::ADC_FULL_SCALE_MV,
        ),
        override_pin: GpioInput::new(pins::OVERRIDE_GPIO),
        fan: DutyCycleDriver::new(
            LedcFanPwm::new(),
            GpioOutput::new(pins::FAN_IN1_GPIO),
            GpioOutput::new(pins::FAN_IN2_GPIO),
        ),
        display: LogDisplay::new(),
    };
    let mut node = SensingNode::new(UartLink::new(), hw, config);
    let mut sink = LogEventSink::new();

    // ── 4. Lock-step loop (blocks on the link) ────────────────
    node.start(&mut sink)?;
    if let Err(e) = node.run(&mut sink) {
        error!("sensing node halted: {}", e);
        return Err(e.into());
    }
    Ok(())
}
