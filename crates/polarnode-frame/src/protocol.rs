//! Protocol versions and wire constants.
//!
//! The three versions differ in checksum family, temperature encoding and
//! whether the battery byte is mandatory. A deployment picks exactly one;
//! the version is never inferred from the shape of a message.

use std::fmt;
use std::str::FromStr;

use crate::checksum::ChecksumKind;

/// First byte of every telemetry message (node to client).
pub const TELEMETRY_START: u8 = 0xAB;

/// First byte of every command message (client to node).
pub const COMMAND_START: u8 = 0xBA;

/// Start byte, id (2), temperature (2), fan flag, heater flag.
pub const TELEMETRY_HEADER_SIZE: usize = 7;

/// Start byte, command type, value.
pub const COMMAND_PAYLOAD_SIZE: usize = 3;

/// Battery byte meaning "not reported" in fixed-layout versions (`-1` as `i8`).
pub const BATTERY_NOT_REPORTED: u8 = 0xFF;

/// How the temperature field is packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureEncoding {
    /// IEEE 754 binary16, little-endian.
    Float16,
    /// Signed 16-bit integer, little-endian.
    Int16,
}

/// How the battery field is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryLayout {
    /// Always one byte; [`BATTERY_NOT_REPORTED`] means absent.
    Fixed,
    /// Zero or one byte; an empty region means absent.
    Optional,
}

/// Wire protocol version shared by both ends of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    /// XOR-8 checksum, integer temperature, fixed 10-byte telemetry.
    V1,
    /// CRC-16 checksum, float16 temperature, fixed 11-byte telemetry.
    V2,
    /// CRC-16 checksum, float16 temperature, optional battery byte.
    #[default]
    V3,
}

impl ProtocolVersion {
    pub const ALL: [ProtocolVersion; 3] = [Self::V1, Self::V2, Self::V3];

    pub const fn checksum(self) -> ChecksumKind {
        match self {
            Self::V1 => ChecksumKind::Xor8,
            Self::V2 | Self::V3 => ChecksumKind::Crc16,
        }
    }

    pub const fn temperature(self) -> TemperatureEncoding {
        match self {
            Self::V1 => TemperatureEncoding::Int16,
            Self::V2 | Self::V3 => TemperatureEncoding::Float16,
        }
    }

    pub const fn battery_layout(self) -> BatteryLayout {
        match self {
            Self::V1 | Self::V2 => BatteryLayout::Fixed,
            Self::V3 => BatteryLayout::Optional,
        }
    }

    /// Shortest telemetry message this version accepts.
    pub const fn min_telemetry_len(self) -> usize {
        let fixed_battery = match self.battery_layout() {
            BatteryLayout::Fixed => 1,
            BatteryLayout::Optional => 0,
        };
        TELEMETRY_HEADER_SIZE + fixed_battery + 1 + self.checksum().size()
    }

    /// Longest telemetry message this version accepts.
    pub const fn max_telemetry_len(self) -> usize {
        TELEMETRY_HEADER_SIZE + 1 + 1 + self.checksum().size()
    }

    /// Exact length of a command message.
    pub const fn command_len(self) -> usize {
        COMMAND_PAYLOAD_SIZE + self.checksum().size()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a protocol version tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol version {0:?} (expected v1, v2 or v3)")]
pub struct ParseProtocolVersionError(pub String);

impl FromStr for ProtocolVersion {
    type Err = ParseProtocolVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            _ => Err(ParseProtocolVersionError(s.to_string())),
        }
    }
}
