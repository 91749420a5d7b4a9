//! GPIO / peripheral pin assignments for the Sprout germination board.
//!
//! Single source of truth. Every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Grow light (three MOSFET channels on the LED strip)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Cooling fan (PWM speed command)
// ---------------------------------------------------------------------------

pub const FAN_PWM_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Relay board (mains sockets, active LOW)
// ---------------------------------------------------------------------------

/// Relay 1: water heater element.
pub const HEATER_RELAY_GPIO: i32 = 2;
/// Relay 2: irrigation pump.
pub const PUMP_RELAY_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor in the grow chamber, 10 kΩ @ 25 °C divider.
pub const ADC1_CH_AIR_TEMP: u32 = 3;
/// Capacitive humidity sensor, ratiometric output.
pub const ADC1_CH_AIR_HUMIDITY: u32 = 4;
/// Waterproof NTC thermistor in the reservoir, 10 kΩ @ 25 °C divider.
pub const ADC1_CH_WATER_TEMP: u32 = 5;
/// LCD front panel right button (resistor ladder, pressed pulls low).
pub const ADC1_CH_BUTTON_RIGHT: u32 = 6;
/// LCD front panel left button.
pub const ADC1_CH_BUTTON_LEFT: u32 = 7;

// ---------------------------------------------------------------------------
// UART
// ---------------------------------------------------------------------------

/// Host link (USB-serial bridge to the supervising PC).
pub const HOST_UART_PORT: i32 = 0;
pub const HOST_UART_TX_GPIO: i32 = 43;
pub const HOST_UART_RX_GPIO: i32 = 44;

/// M18ST05A front panel display, write-only.
pub const LCD_UART_PORT: i32 = 1;
pub const LCD_UART_TX_GPIO: i32 = 17;
pub const LCD_UART_RX_GPIO: i32 = 18;
/// The panel only speaks 9600 baud.
pub const LCD_UART_BAUD: u32 = 9_600;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the grow light channels.
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC frequency for the fan (25 kHz, inaudible).
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;
