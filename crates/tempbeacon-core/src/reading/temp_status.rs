use serde::Serialize;

use super::layout;

/// Power source reported by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerStatus {
    Network,
    Battery,
}

impl PowerStatus {
    pub fn label(self) -> &'static str {
        match self {
            PowerStatus::Network => "network",
            PowerStatus::Battery => "battery",
        }
    }
}

impl std::fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unpacked form of the 16-bit temperature/status field.
///
/// The temperature is kept within 15 bits so that packing never spills into
/// the status bit.
///
/// # Examples
/// ```
/// use tempbeacon_core::{PowerStatus, TempStatus};
///
/// let field = TempStatus::clamped(215, PowerStatus::Battery);
/// assert_eq!(field.pack(), 0x8000 | 215);
/// assert_eq!(TempStatus::unpack(0x8000 | 215), field);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempStatus {
    temperature: u16,
    power: PowerStatus,
}

impl TempStatus {
    /// Bound a raw tenths-of-degree value to the transmittable range.
    /// Out-of-range values are clamped, never rejected.
    pub fn clamped(raw_tenths: i32, power: PowerStatus) -> Self {
        let clamped = raw_tenths.clamp(
            i32::from(layout::TEMP_MIN_TENTHS),
            i32::from(layout::TEMP_MAX_TENTHS),
        );
        Self {
            temperature: clamped as u16 & layout::TEMP_MASK,
            power,
        }
    }

    pub fn unpack(raw: u16) -> Self {
        let power = if raw & layout::STATUS_MASK == 0 {
            PowerStatus::Network
        } else {
            PowerStatus::Battery
        };
        Self {
            temperature: raw & layout::TEMP_MASK,
            power,
        }
    }

    pub fn pack(self) -> u16 {
        let status = match self.power {
            PowerStatus::Network => 0,
            PowerStatus::Battery => layout::STATUS_MASK,
        };
        (self.temperature & layout::TEMP_MASK) | status
    }

    /// Temperature in tenths of a degree.
    pub fn temperature(self) -> u16 {
        self.temperature
    }

    pub fn power(self) -> PowerStatus {
        self.power
    }

    pub fn whole_degrees(self) -> u16 {
        self.temperature / 10
    }

    pub fn tenths_digit(self) -> u16 {
        self.temperature % 10
    }
}
