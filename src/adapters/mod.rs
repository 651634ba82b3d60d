//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements                   | Connects to                 |
//! |-------------|------------------------------|-----------------------------|
//! | `hardware`  | AnalogInput                  | ESP32 ADC1 oneshot          |
//! |             | InputPin / OutputPin         | ESP32 GPIO                  |
//! |             | SetDutyCycle / PwmTimer      | ESP32 LEDC                  |
//! | `uart`      | Link                         | UART1 to the partner node   |
//! | `loopback`  | Link                         | In-process `mpsc` pair      |
//! | `display`   | DisplayPort                  | Serial log output           |
//! | `log_sink`  | EventSink                    | Serial log output           |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod loopback;
pub mod uart;
