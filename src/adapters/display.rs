//! Log-backed display adapter.
//!
//! The character LCD driver is outside this firmware; this adapter keeps
//! the last text per row and writes a log line only when a row changes.

use heapless::String;
use log::info;

use crate::app::ports::DisplayPort;

const ROWS: usize = 2;

pub struct LogDisplay {
    rows: [String<16>; ROWS],
    updates: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            rows: [String::new(), String::new()],
            updates: 0,
        }
    }

    pub fn row(&self, row: u8) -> Option<&str> {
        self.rows.get(row as usize).map(String::as_str)
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, row: u8, text: &str) {
        let Some(slot) = self.rows.get_mut(row as usize) else {
            return;
        };
        // Longer text is truncated to the panel width.
        let mut line = String::<16>::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        if *slot == line {
            return;
        }
        *slot = line;
        self.updates = self.updates.wrapping_add(1);
        info!("LCD[{}] {}", row, slot);
    }
}
