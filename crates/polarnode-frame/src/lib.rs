//! Telemetry and command frame codec for the PolarNode UART protocol.
//!
//! A node reports telemetry to the client and receives commands back, each
//! as one already-delimited binary message:
//! - Telemetry starts with `0xAB`: node id, temperature, fan/heater flags,
//!   an optional battery byte, a status code and a trailing checksum
//! - Commands start with `0xBA`: command type, value and a trailing checksum
//!
//! The checksum family, temperature encoding and battery layout are fixed by
//! the [`ProtocolVersion`] both ends agree on. Every call is a pure function
//! of its input bytes; rejected messages are reported as [`FrameError`] and
//! never affect later calls.

pub mod checksum;
pub mod codec;
pub mod command;
pub mod error;
pub mod float16;
pub mod protocol;
pub mod reader;
pub mod status;
pub mod telemetry;
pub mod writer;

pub use checksum::{crc16_ccitt_false, xor8, ChecksumKind};
pub use codec::Codec;
pub use command::{
    decode_command, encode_command, CommandFrame, CommandType, TOGGLE_FAN, TOGGLE_HEATER,
};
pub use error::{CaptureError, FrameError, Result};
pub use float16::{decode_f16, encode_f16};
pub use protocol::{
    BatteryLayout, ParseProtocolVersionError, ProtocolVersion, TemperatureEncoding, COMMAND_START,
    TELEMETRY_START,
};
pub use reader::{parse_hex, CaptureReader, CapturedMessage};
pub use status::Status;
pub use telemetry::{decode_telemetry, encode_telemetry, TelemetryFrame, TelemetrySample};
pub use writer::{format_hex, CaptureWriter};
