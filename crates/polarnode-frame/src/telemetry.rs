use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::float16::{decode_f16, encode_f16};
use crate::protocol::{
    BatteryLayout, ProtocolVersion, TemperatureEncoding, BATTERY_NOT_REPORTED,
    TELEMETRY_HEADER_SIZE, TELEMETRY_START,
};
use crate::status::Status;

/// A validated telemetry report from one node.
///
/// Only [`decode_telemetry`] produces this type, and only after the checksum
/// has been verified.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct TelemetryFrame {
    /// Identifier of the reporting node.
    pub id: u16,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    pub fan_on: bool,
    pub heater_on: bool,
    /// Battery percentage, `None` when the node did not report one.
    pub battery: Option<u8>,
    /// Raw status code; see [`TelemetryFrame::condition`].
    pub status: u8,
}

impl TelemetryFrame {
    /// Interpreted status condition.
    pub fn condition(&self) -> Status {
        Status::from(self.status)
    }
}

/// Field values used to build an outbound telemetry message.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetrySample {
    pub id: u16,
    pub temperature: f32,
    pub fan_on: bool,
    pub heater_on: bool,
    pub battery: Option<u8>,
    pub status: u8,
}

impl From<&TelemetryFrame> for TelemetrySample {
    fn from(frame: &TelemetryFrame) -> Self {
        Self {
            id: frame.id,
            temperature: frame.temperature,
            fan_on: frame.fan_on,
            heater_on: frame.heater_on,
            battery: frame.battery,
            status: frame.status,
        }
    }
}

/// Decode one telemetry message.
///
/// Validation order: minimum length, start byte, checksum, then field
/// extraction. The first failure is returned; no frame is built for a
/// message that fails any step.
///
/// Wire format (multi-byte fields little-endian, checksum big-endian):
/// ```text
/// ┌──────┬─────────┬──────────┬─────┬────────┬───────────┬────────┬──────────┐
/// │ 0xAB │ id (2B) │ temp (2B)│ fan │ heater │ battery?  │ status │ checksum │
/// │      │         │          │     │        │ (0 or 1B) │        │ (1/2 B)  │
/// └──────┴─────────┴──────────┴─────┴────────┴───────────┴────────┴──────────┘
/// ```
pub fn decode_telemetry(message: &[u8], version: ProtocolVersion) -> Result<TelemetryFrame> {
    let result = parse(message, version);
    match &result {
        Ok(frame) => {
            tracing::trace!(id = frame.id, len = message.len(), %version, "telemetry accepted")
        }
        Err(err) => {
            tracing::debug!(error = %err, len = message.len(), %version, "telemetry rejected")
        }
    }
    result
}

fn parse(message: &[u8], version: ProtocolVersion) -> Result<TelemetryFrame> {
    let min = version.min_telemetry_len();
    if message.len() < min {
        return Err(FrameError::TooShort {
            len: message.len(),
            min,
        });
    }

    if message[0] != TELEMETRY_START {
        return Err(FrameError::BadStartByte {
            found: message[0],
            expected: TELEMETRY_START,
        });
    }

    let payload = version.checksum().verify(message)?;

    let (mut header, rest) = payload.split_at(TELEMETRY_HEADER_SIZE);
    header.advance(1);
    let id = header.get_u16_le();
    let raw_temperature = header.get_u16_le();
    let fan_on = header.get_u8() == 1;
    let heater_on = header.get_u8() == 1;

    // `rest` holds the optional region followed by the status byte.
    let (region, status) = rest.split_at(rest.len() - 1);
    let battery = match (region, version.battery_layout()) {
        ([], BatteryLayout::Optional) => None,
        ([BATTERY_NOT_REPORTED], BatteryLayout::Fixed) => None,
        ([level], _) => Some(*level),
        _ => return Err(FrameError::MalformedOptionalRegion { len: region.len() }),
    };

    let temperature = match version.temperature() {
        TemperatureEncoding::Float16 => decode_f16(raw_temperature),
        TemperatureEncoding::Int16 => raw_temperature as i16 as f32,
    };

    Ok(TelemetryFrame {
        id,
        temperature,
        fan_on,
        heater_on,
        battery,
        status: status[0],
    })
}

/// Encode a telemetry message as the node firmware would send it.
///
/// Integer temperatures are rounded and saturate at the `i16` range. A
/// battery of `None` becomes an empty optional region, or the
/// [`BATTERY_NOT_REPORTED`] byte in fixed-layout versions.
///
/// In fixed-layout versions (V1, V2) a battery level of `Some(255)` shares
/// the sentinel byte and therefore decodes as `None`. Only V3 can carry 255.
pub fn encode_telemetry(sample: &TelemetrySample, version: ProtocolVersion) -> Bytes {
    let mut dst = BytesMut::with_capacity(version.max_telemetry_len());
    dst.put_u8(TELEMETRY_START);
    dst.put_u16_le(sample.id);
    let raw_temperature = match version.temperature() {
        TemperatureEncoding::Float16 => encode_f16(sample.temperature),
        TemperatureEncoding::Int16 => sample.temperature.round() as i16 as u16,
    };
    dst.put_u16_le(raw_temperature);
    dst.put_u8(sample.fan_on as u8);
    dst.put_u8(sample.heater_on as u8);
    match (sample.battery, version.battery_layout()) {
        (Some(level), _) => dst.put_u8(level),
        (None, BatteryLayout::Fixed) => dst.put_u8(BATTERY_NOT_REPORTED),
        (None, BatteryLayout::Optional) => {}
    }
    dst.put_u8(sample.status);
    version.checksum().append(&mut dst);
    dst.freeze()
}
