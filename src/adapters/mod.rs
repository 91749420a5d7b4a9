//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                     | Connects to              |
//! |------------|--------------------------------|--------------------------|
//! | `hardware` | SensorPort, ActuatorPort       | ADC1, LEDC, relay GPIOs  |
//! |            | DisplayPort, SerialPort        | panel UART, host UART    |
//! |            | ButtonPort, ClockPort          | button ADC, wall clock   |
//! | `time`     | ClockPort, `DelayNs`           | ESP32 system timer       |

pub mod hardware;
pub mod time;
