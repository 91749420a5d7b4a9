//! M18ST05A front panel display driver.
//!
//! Write-only 9600 baud serial display: two lines of 16 characters, a row
//! of media icons underneath and a free-running internal clock. Every
//! command is an escape sequence:
//!
//! ```text
//!  clear line      1B <line> 1B 50
//!  icon            1B 30 <icon> <level>
//!  show clock      1B 05
//!  set clock       1B 00 <min> <hour> <day> <month> <century> <year>   (BCD)
//!  clock format    1B <format>
//!  CD / REC speed  1B 32 <speed> / 1B 33 <speed>
//! ```
//!
//! Plain bytes after a clear are drawn at the cursor. The encoders below
//! are pure and build one [`Frame`] per command; [`Lcd`] pushes frames to
//! the UART.

use heapless::Vec;

use crate::clock::{CivilTime, to_bcd};

const ESC: u8 = 0x1B;
const OP_CLEAR: u8 = 0x50;
const OP_ICON: u8 = 0x30;
const OP_SHOW_CLOCK: u8 = 0x05;
const OP_SET_CLOCK: u8 = 0x00;
const OP_CD_SPEED: u8 = 0x32;
const OP_REC_SPEED: u8 = 0x33;

/// Characters per line.
pub const COLUMNS: usize = 16;

/// Degree sign in the panel's character ROM.
pub const DEGREE: u8 = 0xB0;

/// One encoded command (longest: clear + a full line).
pub type Frame = Vec<u8, 24>;

/// Line selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayLine {
    Both = 0x20,
    Top = 0x21,
    Bottom = 0x22,
}

/// Icon brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IconLevel {
    Off = 0x00,
    Low = 0x01,
    Medium = 0x02,
    High = 0x03,
}

/// CD spin / REC blink rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IconSpeed {
    Stop = 0x00,
    Max = 0x01,
    Medium = 0x02,
    Low = 0x03,
}

/// Internal clock presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockFormat {
    Eu = 0x01,
    Us = 0x02,
    Still = 0x03,
    Mobile = 0x04,
}

/// Icons and frames below the text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Icon {
    Hdd = 0x00,
    FireWire = 0x01,
    Cd = 0x02,
    Usb = 0x03,
    Movie = 0x04,
    Tv = 0x05,
    Music = 0x06,
    Picture = 0x07,
    Rec = 0x08,
    MailOut = 0x09,
    MailIn = 0x10,
    Sound1 = 0x11,
    Sound2 = 0x12,
    Sound3 = 0x13,
    Sound4 = 0x14,
    Sound5 = 0x15,
    Sound6 = 0x16,
    Sound7 = 0x17,
    SoundRedLine = 0x18,
    Sound = 0x19,
    Mute = 0x20,
    MiniSound1 = 0x21,
    MiniSound2 = 0x22,
    MiniSound3 = 0x23,
    FrameSources = 0x24,
    FrameMedias = 0x25,
    FrameVcr = 0x26,
    FrameMail = 0x27,
}

// ── Encoders ─────────────────────────────────────────────────

/// Map a character to the panel's character set.
pub fn encode_char(c: char) -> u8 {
    match c {
        '°' => DEGREE,
        c if c.is_ascii() => c as u8,
        _ => b'?',
    }
}

fn frame(bytes: &[u8]) -> Frame {
    let mut f = Frame::new();
    // Every fixed command is shorter than the frame capacity.
    let _ = f.extend_from_slice(bytes);
    f
}

pub fn clear(line: DisplayLine) -> Frame {
    frame(&[ESC, line as u8, ESC, OP_CLEAR])
}

/// Clear `line` then draw `text` from `column`. Anything past the last
/// column is dropped; a column beyond the line only clears it.
pub fn text_at(text: &str, line: DisplayLine, column: u8) -> Frame {
    let mut f = clear(line);
    let column = usize::from(column);
    if column < COLUMNS {
        let glyphs = core::iter::repeat_n(b' ', column).chain(text.chars().map(encode_char));
        for byte in glyphs.take(COLUMNS) {
            let _ = f.push(byte);
        }
    }
    f
}

/// Draw `text` at the current cursor, at most one line's worth.
pub fn text(text: &str) -> Frame {
    text.chars().map(encode_char).take(COLUMNS).collect()
}

pub fn icon(icon: Icon, level: IconLevel) -> Frame {
    frame(&[ESC, OP_ICON, icon as u8, level as u8])
}

pub fn show_clock() -> Frame {
    frame(&[ESC, OP_SHOW_CLOCK])
}

pub fn set_clock(time: &CivilTime) -> Frame {
    frame(&[
        ESC,
        OP_SET_CLOCK,
        to_bcd(time.minute),
        to_bcd(time.hour),
        to_bcd(time.day),
        to_bcd(time.month),
        to_bcd((time.year / 100) as u8),
        to_bcd((time.year % 100) as u8),
    ])
}

pub fn clock_format(format: ClockFormat) -> Frame {
    frame(&[ESC, format as u8])
}

pub fn cd_speed(speed: IconSpeed) -> Frame {
    frame(&[ESC, OP_CD_SPEED, speed as u8])
}

pub fn rec_speed(speed: IconSpeed) -> Frame {
    frame(&[ESC, OP_REC_SPEED, speed as u8])
}

// ── Driver ───────────────────────────────────────────────────

/// Display attached to a UART.
pub struct Lcd {
    uart_port: i32,
}

impl Lcd {
    pub fn new(uart_port: i32) -> Self {
        Self { uart_port }
    }

    /// Push one encoded command to the panel.
    pub fn send(&mut self, frame: &Frame) {
        super::hw_init::uart_write(self.uart_port, frame);
    }
}
