//! GPIO / peripheral pin assignments for both FanLink boards.
//!
//! Single source of truth: every adapter references this module rather than
//! hard-coding pin numbers. Both boards share the fan driver and UART wiring.

// ---------------------------------------------------------------------------
// Inter-node UART
// ---------------------------------------------------------------------------

/// UART port used for the node-to-node link.
pub const LINK_UART_PORT: i32 = 1;
pub const LINK_UART_TX_GPIO: i32 = 17;
pub const LINK_UART_RX_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Fan H-bridge (both nodes)
// ---------------------------------------------------------------------------

/// LEDC PWM output to the H-bridge enable pin.
pub const FAN_PWM_GPIO: i32 = 6;
/// H-bridge IN1.
pub const FAN_IN1_GPIO: i32 = 7;
/// H-bridge IN2.
pub const FAN_IN2_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Analog input (both nodes: LM35 on A, potentiometer on B)
// ---------------------------------------------------------------------------

/// GPIO 4 on ESP32-S3 = ADC1 channel 3.
pub const ANALOG_GPIO: i32 = 4;
pub const ANALOG_ADC1_CHANNEL: u32 = 3;
/// Native ADC resolution; samples are reduced to 10 bits.
pub const ADC_RESOLUTION_BITS: u8 = 12;

// ---------------------------------------------------------------------------
// Sensing node only
// ---------------------------------------------------------------------------

/// Manual override push-button. HIGH = override asserted.
pub const OVERRIDE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Actuating node only
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 10;
pub const LED_YELLOW_GPIO: i32 = 11;
pub const LED_RED_GPIO: i32 = 12;
