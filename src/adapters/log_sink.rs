//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per node event to the
//! ESP-IDF logger (UART0 / USB-CDC in production).

use log::info;

use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`NodeEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::Started(role) => {
                info!("START | role={:?}", role);
            }
            NodeEvent::TemperatureSent { phase, report } => {
                info!("TEMP  | {:?} sent {:?}", phase, report);
            }
            NodeEvent::TemperatureReceived {
                phase,
                report,
                sample,
                band,
            } => {
                info!(
                    "TEMP  | {:?} got {:?} | sample={} | band={:?}",
                    phase,
                    report,
                    sample.value(),
                    band
                );
            }
            NodeEvent::SpeedClassSent {
                phase,
                request,
                class,
            } => {
                info!(
                    "SPEED | {:?} fan {:?}@{} | sent {:?}",
                    phase, request.direction, request.magnitude, class
                );
            }
            NodeEvent::SpeedClassReceived {
                phase,
                class,
                fan_running,
            } => {
                info!(
                    "SPEED | {:?} got {:?} | fan {}",
                    phase,
                    class,
                    if *fan_running { "ON" } else { "OFF" }
                );
            }
        }
    }
}
