//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, relay GPIOs, LEDC timers/channels and the two
//! UARTs using raw ESP-IDF sys calls. Called once from `main()` before the
//! boot handshake starts.
//!
//! Off target every accessor falls back to an in-memory stub so the
//! drivers above compile and run in host tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

/// Bring up every peripheral. `host_baud` is the host link speed.
#[cfg(target_os = "espidf")]
pub fn init_peripherals(host_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_relays()?;
        init_ledc()?;
        init_uart(pins::HOST_UART_PORT, host_baud, pins::HOST_UART_TX_GPIO, pins::HOST_UART_RX_GPIO)?;
        init_uart(pins::LCD_UART_PORT, pins::LCD_UART_BAUD, pins::LCD_UART_TX_GPIO, pins::LCD_UART_RX_GPIO)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_host_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

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

    for channel in [
        pins::ADC1_CH_AIR_TEMP,
        pins::ADC1_CH_AIR_HUMIDITY,
        pins::ADC1_CH_WATER_TEMP,
        pins::ADC1_CH_BUTTON_RIGHT,
        pins::ADC1_CH_BUTTON_LEFT,
    ] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!("hw_init: ADC1 configured (probes CH3-5, buttons CH6-7)");
    Ok(())
}

/// One-shot 12-bit read. `None` if the driver reports an error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.clamp(0, i32::from(ADC_MAX)) as u16)
}

#[cfg(not(target_os = "espidf"))]
mod sim_adc {
    use core::sync::atomic::{AtomicU16, Ordering};

    /// Mid-scale: both thermistors read 25 °C, humidity reads mid-range.
    const PROBE_IDLE: u16 = 2048;
    /// Pull-up level: button released.
    const BUTTON_IDLE: u16 = super::ADC_MAX;

    static SIM_ADC: [AtomicU16; 8] = [
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(PROBE_IDLE),
        AtomicU16::new(BUTTON_IDLE),
        AtomicU16::new(BUTTON_IDLE),
    ];

    pub fn read(channel: u32) -> Option<u16> {
        SIM_ADC.get(channel as usize).map(|a| a.load(Ordering::Relaxed))
    }

    pub fn set(channel: u32, raw: u16) {
        if let Some(a) = SIM_ADC.get(channel as usize) {
            a.store(raw, Ordering::Relaxed);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> Option<u16> {
    sim_adc::read(channel)
}

/// Inject a raw ADC level for host simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    sim_adc::set(channel, raw);
}

// ── Relay outputs (active LOW) ────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_relays() -> Result<(), HwInitError> {
    for &pin in &[pins::HEATER_RELAY_GPIO, pins::PUMP_RELAY_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        // HIGH releases an active-low relay.
        unsafe { gpio_set_level(pin, 1) };
    }

    info!("hw_init: relay outputs configured (released)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_relays(). Main-loop only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_LED_R: u32 = 0;
pub const LEDC_CH_LED_G: u32 = 1;
pub const LEDC_CH_LED_B: u32 = 2;
pub const LEDC_CH_FAN: u32 = 3;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: grow light (1 kHz, 8-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::LED_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Timer 1: fan (25 kHz, 8-bit)
    let timer1 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_1,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::FAN_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer1) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    let channels = [
        (LEDC_CH_LED_R, ledc_timer_t_LEDC_TIMER_0, pins::LED_R_GPIO),
        (LEDC_CH_LED_G, ledc_timer_t_LEDC_TIMER_0, pins::LED_G_GPIO),
        (LEDC_CH_LED_B, ledc_timer_t_LEDC_TIMER_0, pins::LED_B_GPIO),
        (LEDC_CH_FAN, ledc_timer_t_LEDC_TIMER_1, pins::FAN_PWM_GPIO),
    ];
    for (channel, timer, gpio) in channels {
        let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: timer,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        }) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    info!("hw_init: LEDC configured (led=CH0-2, fan=CH3)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── UART ─────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(port: i32, baud: u32, tx: i32, rx: i32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    // SAFETY: single-threaded init; port numbers come from pins.rs.
    let ret = unsafe { uart_driver_install(port, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
    let ret = unsafe { uart_param_config(port, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
    let ret = unsafe { uart_set_pin(port, tx, rx, UART_PIN_NO_CHANGE, UART_PIN_NO_CHANGE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: UART{} configured at {} baud", port, baud);
    Ok(())
}

/// Blocking write of `bytes` to a UART's TX FIFO.
#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, bytes: &[u8]) {
    // SAFETY: the driver for `port` was installed in init_uart(); the buffer
    // outlives the call.
    unsafe { uart_write_bytes(port, bytes.as_ptr().cast(), bytes.len()); }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_port: i32, _bytes: &[u8]) {}

/// Non-blocking read of one byte from a UART's RX buffer.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte(port: i32) -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: zero tick timeout, one-byte buffer on the stack.
    let n = unsafe { uart_read_bytes(port, (&raw mut byte).cast(), 1, 0) };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte(_port: i32) -> Option<u8> {
    None
}
