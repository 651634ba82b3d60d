//! Display line layouts for both nodes (16-column character LCD).

use core::fmt::Write;

use heapless::String;

use crate::sensors::AnalogSample;

pub type Line = String<16>;

/// Sensing node, row 0: `Temp = 45 C`.
pub fn temperature_line(celsius: u8) -> Line {
    let mut line = Line::new();
    // 11 characters at most; cannot overflow 16.
    let _ = write!(line, "Temp = {:<3}C", celsius);
    line
}

/// Actuating node, row 0 caption.
pub const SAMPLE_CAPTION: &str = "ADC VALUE = ";

/// Actuating node, row 1: the sample left-aligned and space-padded so a
/// shorter value overwrites a longer one.
pub fn sample_line(sample: AnalogSample) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{:<4}", sample.value());
    line
}
