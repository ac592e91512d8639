use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::checksum::{byte_sum, checksum_for};
use super::error::DecodeError;
use super::layout;
use super::reader::ReadingReader;
use super::temp_status::{PowerStatus, TempStatus};
use super::writer::ReadingWriter;

/// One telemetry record as carried on the wire.
///
/// The checksum is stored as received, so a decoded reading can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: i32,
    pub temp_status: TempStatus,
    pub id: u8,
    pub checksum: u8,
}

impl Reading {
    /// Build a checksummed reading from raw sensor inputs.
    ///
    /// # Examples
    /// ```
    /// use tempbeacon_core::{PowerStatus, Reading, validate};
    ///
    /// let reading = Reading::new(1_700_000_000, 5000, PowerStatus::Battery, 3);
    /// assert_eq!(reading.temp_status.temperature(), 1200);
    /// assert!(validate(&reading));
    /// ```
    pub fn new(timestamp: i32, raw_temperature_tenths: i32, power: PowerStatus, id: u8) -> Self {
        let temp_status = TempStatus::clamped(raw_temperature_tenths, power);
        let mut writer = write_fields(timestamp, temp_status, id);
        let checksum = checksum_for(&writer.as_bytes()[..layout::CHECKSUM_OFFSET]);
        writer.write_u8(layout::CHECKSUM_OFFSET, checksum);
        Self {
            timestamp,
            temp_status,
            id,
            checksum,
        }
    }

    pub fn to_bytes(&self) -> [u8; layout::READING_SIZE] {
        let mut writer = write_fields(self.timestamp, self.temp_status, self.id);
        writer.write_u8(layout::CHECKSUM_OFFSET, self.checksum);
        writer.finish()
    }
}

fn write_fields(timestamp: i32, temp_status: TempStatus, id: u8) -> ReadingWriter {
    let mut writer = ReadingWriter::new();
    writer
        .write_i32_be(layout::TIMESTAMP_RANGE, timestamp)
        .write_u16_be(layout::TEMP_STATUS_RANGE, temp_status.pack())
        .write_u8(layout::ID_OFFSET, id);
    writer
}

/// Encode raw inputs into an 8-byte network-order packet.
///
/// Never fails: the temperature is clamped to 20.0–120.0 degrees.
///
/// # Examples
/// ```
/// use tempbeacon_core::{PowerStatus, encode};
///
/// let bytes = encode(0, 200, PowerStatus::Network, 0);
/// assert_eq!(bytes, [0, 0, 0, 0, 0x00, 0xC8, 0x00, 0x38]);
/// ```
pub fn encode(
    timestamp: i32,
    raw_temperature_tenths: i32,
    power: PowerStatus,
    id: u8,
) -> [u8; layout::READING_SIZE] {
    Reading::new(timestamp, raw_temperature_tenths, power, id).to_bytes()
}

/// Decode an 8-byte packet.
///
/// Only the length is checked; checksum validity is reported by
/// [`validate`].
pub fn decode(payload: &[u8]) -> Result<Reading, DecodeError> {
    let reader = ReadingReader::new(payload);
    reader.require_exact_len()?;

    let timestamp = reader.read_i32_be(layout::TIMESTAMP_RANGE)?;
    let temp_status = TempStatus::unpack(reader.read_u16_be(layout::TEMP_STATUS_RANGE)?);
    let id = reader.read_u8(layout::ID_OFFSET)?;
    let checksum = reader.read_u8(layout::CHECKSUM_OFFSET)?;

    Ok(Reading {
        timestamp,
        temp_status,
        id,
        checksum,
    })
}

/// True when the byte-sum of the serialized reading, checksum included, is
/// zero modulo 256.
pub fn validate(reading: &Reading) -> bool {
    byte_sum(&reading.to_bytes()) == 0
}

/// Display-ready fields derived from a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingSummary {
    pub id: u8,
    pub timestamp: i32,
    /// RFC3339 rendering of `timestamp`, when representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub whole_degrees: u16,
    pub tenths_digit: u16,
    pub power: PowerStatus,
    pub checksum: u8,
    pub valid: bool,
}

impl ReadingSummary {
    pub fn temperature_label(&self) -> String {
        format!("{}.{}", self.whole_degrees, self.tenths_digit)
    }

    pub fn validity_label(&self) -> &'static str {
        if self.valid { "valid" } else { "invalid" }
    }
}

/// Derive display fields; rendering is left to the caller.
///
/// # Examples
/// ```
/// use tempbeacon_core::{PowerStatus, decode, describe};
///
/// let reading = decode(&[0, 0, 0, 0, 0x00, 0xC8, 0x00, 0x38])?;
/// let summary = describe(&reading);
/// assert_eq!((summary.whole_degrees, summary.tenths_digit), (20, 0));
/// assert_eq!(summary.power, PowerStatus::Network);
/// assert_eq!(summary.validity_label(), "valid");
/// # Ok::<(), tempbeacon_core::DecodeError>(())
/// ```
pub fn describe(reading: &Reading) -> ReadingSummary {
    ReadingSummary {
        id: reading.id,
        timestamp: reading.timestamp,
        time: timestamp_to_rfc3339(reading.timestamp),
        whole_degrees: reading.temp_status.whole_degrees(),
        tenths_digit: reading.temp_status.tenths_digit(),
        power: reading.temp_status.power(),
        checksum: reading.checksum,
        valid: validate(reading),
    }
}

fn timestamp_to_rfc3339(timestamp: i32) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(i64::from(timestamp))
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use super::{Reading, decode, describe, encode, validate};
    use crate::reading::error::DecodeError;
    use crate::reading::layout;
    use crate::reading::temp_status::PowerStatus;

    #[test]
    fn worked_checksum_example() {
        let bytes = encode(0, 200, PowerStatus::Network, 0);
        assert_eq!(bytes, [0, 0, 0, 0, 0x00, 0xC8, 0x00, 0x38]);
        let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(sum, 0);
    }

    #[test]
    fn decode_reads_every_field() {
        let bytes = encode(1_700_000_123, 735, PowerStatus::Battery, 42);
        let reading = decode(&bytes).unwrap();
        assert_eq!(reading.timestamp, 1_700_000_123);
        assert_eq!(reading.temp_status.temperature(), 735);
        assert_eq!(reading.temp_status.power(), PowerStatus::Battery);
        assert_eq!(reading.id, 42);
        assert_eq!(reading.checksum, bytes[layout::CHECKSUM_OFFSET]);
        assert_eq!(reading.to_bytes(), bytes);
    }

    #[test]
    fn decode_keeps_bad_checksum() {
        let mut bytes = encode(10, 300, PowerStatus::Network, 1);
        bytes[layout::CHECKSUM_OFFSET] = bytes[layout::CHECKSUM_OFFSET].wrapping_add(1);
        let reading = decode(&bytes).unwrap();
        assert!(!validate(&reading));
        assert_eq!(describe(&reading).validity_label(), "invalid");
    }

    #[test]
    fn decode_short_payload() {
        let err = decode(&[0u8; layout::READING_SIZE - 1]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedLength {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn decode_long_payload() {
        let err = decode(&[0u8; layout::READING_SIZE + 1]).unwrap_err();
        assert!(err.to_string().contains("got 9"));
    }

    #[test]
    fn describe_out_of_range_field_from_wire() {
        // 0x7FFF is outside the encodable range but still a legal wire value.
        let reading = Reading {
            timestamp: 0,
            temp_status: crate::TempStatus::unpack(0xFFFF),
            id: 0,
            checksum: 0,
        };
        let summary = describe(&reading);
        assert_eq!(summary.whole_degrees, 3276);
        assert_eq!(summary.tenths_digit, 7);
        assert_eq!(summary.power, PowerStatus::Battery);
    }

    #[test]
    fn describe_renders_time() {
        let summary = describe(&Reading::new(0, 200, PowerStatus::Network, 0));
        assert_eq!(summary.time.as_deref(), Some("1970-01-01T00:00:00Z"));
        assert_eq!(summary.temperature_label(), "20.0");
    }

    #[test]
    fn summary_json_uses_lowercase_power() {
        let summary = describe(&Reading::new(0, 215, PowerStatus::Battery, 9));
        let value = serde_json::to_value(&summary).expect("summary json");
        assert_eq!(value["power"], "battery");
        assert_eq!(value["whole_degrees"], 21);
        assert_eq!(value["tenths_digit"], 5);
        assert_eq!(value["valid"], true);
        assert_eq!(
            serde_json::to_value(PowerStatus::Network).expect("power json"),
            "network"
        );
    }
}
