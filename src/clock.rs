//! Civil time helpers.
//!
//! The host sets the wall clock as Unix epoch seconds; the lighting schedule
//! needs minute-of-day and the display's internal clock wants calendar fields
//! in BCD. No time zone handling: the host sends local time.

/// Calendar breakdown of an epoch timestamp (UTC arithmetic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CivilTime {
    /// Convert Unix epoch seconds to calendar fields.
    ///
    /// Uses the days-to-civil algorithm (proleptic Gregorian), valid for the
    /// whole `u32` range.
    pub fn from_epoch(epoch: u32) -> Self {
        let days = i64::from(epoch / 86_400);
        let secs = epoch % 86_400;

        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            hour: (secs / 3_600) as u8,
            minute: ((secs % 3_600) / 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    /// Minutes elapsed since local midnight (0..=1439).
    pub fn minute_of_day(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

/// Minute-of-day straight from an epoch timestamp.
pub fn minute_of_day(epoch: u32) -> u16 {
    ((epoch % 86_400) / 60) as u16
}

/// Pack a two-digit decimal number into BCD. Values above 99 wrap mod 100.
pub fn to_bcd(value: u8) -> u8 {
    let v = value % 100;
    ((v / 10) << 4) | (v % 10)
}
