//! One-shot hardware peripheral initialization and raw peripheral access.
//!
//! Configures the link UART, ADC1, GPIO directions and the fan LEDC channel
//! using raw ESP-IDF sys calls. `init_peripherals` is called once from each
//! node's `main()` before the control loop starts.
//!
//! On host targets every function has a simulation twin backed by atomics
//! and an in-memory UART queue; tests inject inputs with the `sim_*`
//! helpers and read back outputs the same way.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::config::TimerConfig;
use crate::protocol::NodeRole;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    UartInitFailed(i32),
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UartInitFailed(rc)   => write!(f, "UART init failed (rc={})", rc),
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(role: NodeRole, baud_rate: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_uart(baud_rate)?;
        init_adc()?;
        init_gpio_inputs(role)?;
        init_gpio_outputs(role)?;
    }
    info!("hw_init: all peripherals configured for {:?} node", role);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(role: NodeRole, _baud_rate: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped for {:?} node", role);
    Ok(())
}

// ── UART (node-to-node link) ──────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud_rate: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud_rate as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        rx_flow_ctrl_thresh: 0,
        ..Default::default()
    };
    let ret = unsafe { uart_param_config(pins::LINK_UART_PORT, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            pins::LINK_UART_PORT,
            pins::LINK_UART_TX_GPIO,
            pins::LINK_UART_RX_GPIO,
            -1,
            -1,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_driver_install(pins::LINK_UART_PORT, 256, 0, 0, core::ptr::null_mut(), 0)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: UART{} configured ({} baud, 8N1)", pins::LINK_UART_PORT, baud_rate);
    Ok(())
}

/// Blocking single-byte transmit; returns once the byte has left the FIFO.
#[cfg(target_os = "espidf")]
pub fn uart_write(byte: u8) -> Result<(), i32> {
    // SAFETY: UART driver installed in init_uart(); only the main loop
    // touches the link port.
    let written = unsafe {
        uart_write_bytes(pins::LINK_UART_PORT, (&raw const byte).cast(), 1)
    };
    if written != 1 {
        return Err(written);
    }
    let ret = unsafe { uart_wait_tx_done(pins::LINK_UART_PORT, TickType_t::MAX) };
    if ret != ESP_OK as i32 { return Err(ret); }
    Ok(())
}

/// Blocking single-byte receive with no timeout.
#[cfg(target_os = "espidf")]
pub fn uart_read() -> Result<u8, i32> {
    let mut byte: u8 = 0;
    loop {
        // SAFETY: see uart_write(); `byte` outlives the call.
        let n = unsafe {
            uart_read_bytes(pins::LINK_UART_PORT, (&raw mut byte).cast(), 1, TickType_t::MAX)
        };
        match n {
            1 => return Ok(byte),
            0 => continue,
            rc => return Err(rc),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod sim_uart {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(super) static RX: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());
    pub(super) static TX: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(byte: u8) -> Result<(), i32> {
    sim_uart::TX.lock().map_err(|_| -1)?.push_back(byte);
    Ok(())
}

/// Simulation has no partner to block on: an empty queue reads as an error.
#[cfg(not(target_os = "espidf"))]
pub fn uart_read() -> Result<u8, i32> {
    sim_uart::RX.lock().map_err(|_| -1)?.pop_front().ok_or(-1)
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_uart_inject(bytes: &[u8]) {
    if let Ok(mut rx) = sim_uart::RX.lock() {
        rx.extend(bytes.iter().copied());
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_uart_take_tx() -> Vec<u8> {
    sim_uart::TX
        .lock()
        .map(|mut tx| tx.drain(..).collect())
        .unwrap_or_default()
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// Input voltage (mV) read as full scale with the 12 dB attenuation below.
pub const ADC_FULL_SCALE_MV: u32 = 3100;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), pins::ANALOG_ADC1_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=analog in)", pins::ANALOG_ADC1_CHANNEL);
    Ok(())
}

/// Raw 12-bit reading.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, i32> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [core::sync::atomic::AtomicU16; 8] =
    [const { core::sync::atomic::AtomicU16::new(0) }; 8];

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> Result<u16, i32> {
    SIM_ADC
        .get(channel as usize)
        .map(|a| a.load(core::sync::atomic::Ordering::Relaxed))
        .ok_or(-1)
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(a) = SIM_ADC.get(channel as usize) {
        a.store(raw, core::sync::atomic::Ordering::Relaxed);
    }
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn configure_pins(pins: &[i32], mode: gpio_mode_t) -> Result<(), HwInitError> {
    for &pin in pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: if mode == gpio_mode_t_GPIO_MODE_INPUT {
                gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
            } else {
                gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
            },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        if mode == gpio_mode_t_GPIO_MODE_OUTPUT {
            unsafe { gpio_set_level(pin, 0) };
        }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs(role: NodeRole) -> Result<(), HwInitError> {
    if role == NodeRole::Sensing {
        unsafe { configure_pins(&[pins::OVERRIDE_GPIO], gpio_mode_t_GPIO_MODE_INPUT)? };
    }
    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs(role: NodeRole) -> Result<(), HwInitError> {
    unsafe {
        configure_pins(&[pins::FAN_IN1_GPIO, pins::FAN_IN2_GPIO], gpio_mode_t_GPIO_MODE_OUTPUT)?;
    }
    if role == NodeRole::Actuating {
        let leds = [pins::LED_GREEN_GPIO, pins::LED_YELLOW_GPIO, pins::LED_RED_GPIO];
        unsafe { configure_pins(&leds, gpio_mode_t_GPIO_MODE_OUTPUT)? };
    }
    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on an already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: pin was configured as an output in init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
static SIM_GPIO: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_GPIO.load(core::sync::atomic::Ordering::Relaxed) & (1u64 << pin) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    use core::sync::atomic::Ordering;
    if high {
        SIM_GPIO.fetch_or(1u64 << pin, Ordering::Relaxed);
    } else {
        SIM_GPIO.fetch_and(!(1u64 << pin), Ordering::Relaxed);
    }
}

/// Drive a simulated input level (or inspect an output with [`gpio_read`]).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gpio(pin: i32, high: bool) {
    gpio_write(pin, high);
}

// ── LEDC PWM (fan) ────────────────────────────────────────────

/// Duty resolution needed to represent `period_ticks` (1023 → 10 bits).
pub fn resolution_bits(period_ticks: u16) -> u32 {
    u16::BITS - period_ticks.leading_zeros()
}

#[cfg(target_os = "espidf")]
pub fn ledc_start(config: &TimerConfig) -> Result<(), i32> {
    // SAFETY: Called from the single main task; the fan channel is owned by
    // exactly one DutyCycleDriver.
    unsafe {
        let timer = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            duty_resolution: resolution_bits(config.period_ticks),
            freq_hz: config.carrier_hz(),
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        let ret = ledc_timer_config(&timer);
        if ret != ESP_OK as i32 { return Err(ret); }

        let ret = ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: crate::pins::FAN_PWM_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        });
        if ret != ESP_OK as i32 { return Err(ret); }

        let ret = ledc_timer_resume(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0);
        if ret != ESP_OK as i32 { return Err(ret); }
    }
    info!("hw_init: LEDC fan channel started ({} Hz)", config.carrier_hz());
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(duty: u16) -> Result<(), i32> {
    // SAFETY: channel configured in ledc_start(); main loop only.
    unsafe {
        let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0, u32::from(duty));
        if ret != ESP_OK as i32 { return Err(ret); }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0);
        if ret != ESP_OK as i32 { return Err(ret); }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_release() -> Result<(), i32> {
    // SAFETY: see ledc_set().
    unsafe {
        let ret = ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0, 0);
        if ret != ESP_OK as i32 { return Err(ret); }
        let ret = ledc_timer_pause(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_timer_t_LEDC_TIMER_0);
        if ret != ESP_OK as i32 { return Err(ret); }
    }
    info!("hw_init: LEDC fan timer released");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_DUTY: core::sync::atomic::AtomicU16 = core::sync::atomic::AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_RUNNING: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn ledc_start(config: &TimerConfig) -> Result<(), i32> {
    SIM_LEDC_RUNNING.store(true, core::sync::atomic::Ordering::Relaxed);
    log::debug!("hw_init(sim): LEDC started at {} Hz", config.carrier_hz());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(duty: u16) -> Result<(), i32> {
    SIM_LEDC_DUTY.store(duty, core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_release() -> Result<(), i32> {
    SIM_LEDC_RUNNING.store(false, core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

/// `(running, duty)` of the simulated fan channel.
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_state() -> (bool, u16) {
    use core::sync::atomic::Ordering;
    (
        SIM_LEDC_RUNNING.load(Ordering::Relaxed),
        SIM_LEDC_DUTY.load(Ordering::Relaxed),
    )
}
