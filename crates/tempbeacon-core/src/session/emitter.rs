use std::net::SocketAddr;

use time::OffsetDateTime;
use tracing::debug;

use crate::reading::{PowerStatus, Reading};
use crate::sensor::TemperatureSource;
use crate::transport::{DatagramTransport, TransportError};

/// Current time as wire seconds. Truncates past 2038.
pub fn unix_timestamp_now() -> i32 {
    OffsetDateTime::now_utc().unix_timestamp() as i32
}

/// Sender-side state: the sensor, the reported power source and the next
/// sequence id. Ids start at 0 and wrap at 256.
pub struct EmitterSession<S> {
    sensor: S,
    power: PowerStatus,
    next_id: u8,
}

impl<S: TemperatureSource> EmitterSession<S> {
    pub fn new(sensor: S, power: PowerStatus) -> Self {
        Self {
            sensor,
            power,
            next_id: 0,
        }
    }

    pub fn next_id(&self) -> u8 {
        self.next_id
    }

    pub fn power(&self) -> PowerStatus {
        self.power
    }

    /// Read the sensor and build the reading for the current id without
    /// advancing the counter.
    pub fn build_reading(&mut self, timestamp: i32) -> Reading {
        Reading::new(
            timestamp,
            self.sensor.read_tenths(),
            self.power,
            self.next_id,
        )
    }

    /// Encode and send one reading, then advance the id. The id does not
    /// advance when the send fails.
    pub fn send_next<T: DatagramTransport>(
        &mut self,
        transport: &T,
        dest: SocketAddr,
        timestamp: i32,
    ) -> Result<Reading, TransportError> {
        let reading = self.build_reading(timestamp);
        let sent = transport.send_to(&reading.to_bytes(), dest)?;
        debug!(
            id = reading.id,
            timestamp = reading.timestamp,
            temperature = reading.temp_status.temperature(),
            power = %reading.temp_status.power(),
            checksum = reading.checksum,
            bytes = sent,
            %dest,
            "sent reading"
        );
        self.next_id = self.next_id.wrapping_add(1);
        Ok(reading)
    }
}
