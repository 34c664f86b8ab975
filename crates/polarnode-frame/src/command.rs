//! Client-to-node command frames.
//!
//! Layout: `[0xBA, command type, value, checksum...]`, where the checksum
//! covers the first three bytes and follows the protocol version's family.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::protocol::{ProtocolVersion, COMMAND_START};

/// Toggle the fan on (value 1) or off (value 0).
pub const TOGGLE_FAN: u8 = 0x01;

/// Toggle the heater on (value 1) or off (value 0).
pub const TOGGLE_HEATER: u8 = 0x02;

/// Command type byte, as understood by the node firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    ToggleFan,
    ToggleHeater,
    /// A type byte this client has no name for. Sent unchanged.
    Other(u8),
}

impl CommandType {
    pub fn code(self) -> u8 {
        match self {
            CommandType::ToggleFan => TOGGLE_FAN,
            CommandType::ToggleHeater => TOGGLE_HEATER,
            CommandType::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandType::ToggleFan => "toggle-fan",
            CommandType::ToggleHeater => "toggle-heater",
            CommandType::Other(_) => "other",
        }
    }
}

impl From<u8> for CommandType {
    fn from(code: u8) -> Self {
        match code {
            TOGGLE_FAN => CommandType::ToggleFan,
            TOGGLE_HEATER => CommandType::ToggleHeater,
            other => CommandType::Other(other),
        }
    }
}

impl From<CommandType> for u8 {
    fn from(command: CommandType) -> Self {
        command.code()
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandType::Other(code) => write!(f, "other(0x{code:02X})"),
            named => f.write_str(named.name()),
        }
    }
}

/// A single command sent in response to a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    pub command: CommandType,
    pub value: u8,
}

impl CommandFrame {
    pub fn new(command: impl Into<CommandType>, value: u8) -> Self {
        Self {
            command: command.into(),
            value,
        }
    }

    pub fn toggle_fan(on: bool) -> Self {
        Self::new(CommandType::ToggleFan, on as u8)
    }

    pub fn toggle_heater(on: bool) -> Self {
        Self::new(CommandType::ToggleHeater, on as u8)
    }

    /// Encode this command for the given protocol version.
    pub fn encode(&self, version: ProtocolVersion) -> Bytes {
        encode_command(self.command.code(), self.value, version)
    }
}

/// Encode a command. Total: every `(type, value)` pair has an encoding.
pub fn encode_command(command_type: u8, value: u8, version: ProtocolVersion) -> Bytes {
    let mut dst = BytesMut::with_capacity(version.command_len());
    dst.put_u8(COMMAND_START);
    dst.put_u8(command_type);
    dst.put_u8(value);
    version.checksum().append(&mut dst);
    dst.freeze()
}

/// Decode a command message as the node firmware would.
pub fn decode_command(message: &[u8], version: ProtocolVersion) -> Result<CommandFrame> {
    let result = parse(message, version);
    if let Err(err) = &result {
        tracing::debug!(error = %err, len = message.len(), %version, "command rejected");
    }
    result
}

fn parse(message: &[u8], version: ProtocolVersion) -> Result<CommandFrame> {
    let expected = version.command_len();
    if message.len() < expected {
        return Err(FrameError::TooShort {
            len: message.len(),
            min: expected,
        });
    }
    if message.len() > expected {
        return Err(FrameError::TrailingBytes {
            len: message.len(),
            expected,
        });
    }

    if message[0] != COMMAND_START {
        return Err(FrameError::BadStartByte {
            found: message[0],
            expected: COMMAND_START,
        });
    }

    let payload = version.checksum().verify(message)?;
    Ok(CommandFrame::new(payload[1], payload[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{crc16_ccitt_false, xor8};

    #[test]
    fn encode_v1_layout() {
        let wire = encode_command(TOGGLE_FAN, 1, ProtocolVersion::V1);
        assert_eq!(wire.as_ref(), &[0xBA, 0x01, 0x01, 0xBA]);
    }

    #[test]
    fn encode_v3_layout() {
        let wire = encode_command(TOGGLE_HEATER, 0, ProtocolVersion::V3);
        let crc = crc16_ccitt_false(&[0xBA, 0x02, 0x00]);
        assert_eq!(wire.len(), 5);
        assert_eq!(&wire[..3], &[0xBA, 0x02, 0x00]);
        assert_eq!(&wire[3..], &crc.to_be_bytes());
    }

    #[test]
    fn encode_is_deterministic() {
        for version in ProtocolVersion::ALL {
            assert_eq!(
                encode_command(0x7F, 0x55, version),
                encode_command(0x7F, 0x55, version)
            );
        }
    }

    #[test]
    fn encode_is_total_over_all_inputs() {
        for version in ProtocolVersion::ALL {
            for command_type in 0..=u8::MAX {
                for value in [0u8, 1, 0xFF] {
                    let wire = encode_command(command_type, value, version);
                    assert_eq!(wire.len(), version.command_len());
                    assert_eq!(wire[0], COMMAND_START);
                }
            }
        }
    }

    #[test]
    fn xor_trailer_matches_accumulator() {
        let wire = encode_command(0x02, 0x01, ProtocolVersion::V1);
        assert_eq!(wire[3], xor8(&wire[..3]));
    }

    #[test]
    fn helpers_build_expected_frames() {
        assert_eq!(
            CommandFrame::toggle_fan(true),
            CommandFrame::new(CommandType::ToggleFan, 1)
        );
        assert_eq!(CommandFrame::toggle_heater(false).value, 0);
        assert_eq!(
            CommandFrame::toggle_heater(true).encode(ProtocolVersion::V2),
            encode_command(TOGGLE_HEATER, 1, ProtocolVersion::V2)
        );
    }

    #[test]
    fn decode_accepts_encoded_commands() {
        for version in ProtocolVersion::ALL {
            let frame = CommandFrame::new(0x09u8, 0x33);
            let decoded = decode_command(&frame.encode(version), version).unwrap();
            assert_eq!(decoded, frame);
            assert_eq!(decoded.command, CommandType::Other(0x09));
        }
    }

    #[test]
    fn decode_rejections() {
        let version = ProtocolVersion::V3;
        let wire = encode_command(TOGGLE_FAN, 1, version).to_vec();

        assert!(matches!(
            decode_command(&wire[..4], version),
            Err(FrameError::TooShort { len: 4, min: 5 })
        ));

        let mut long = wire.clone();
        long.push(0);
        assert!(matches!(
            decode_command(&long, version),
            Err(FrameError::TrailingBytes { len: 6, expected: 5 })
        ));

        let mut bad_start = wire.clone();
        bad_start[0] = 0xAB;
        assert!(matches!(
            decode_command(&bad_start, version),
            Err(FrameError::BadStartByte { found: 0xAB, .. })
        ));

        let mut corrupted = wire;
        corrupted[2] = 0;
        assert!(matches!(
            decode_command(&corrupted, version),
            Err(FrameError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn decode_with_wrong_version_is_rejected() {
        let wire = encode_command(TOGGLE_FAN, 1, ProtocolVersion::V1);
        assert!(decode_command(&wire, ProtocolVersion::V3).is_err());
    }

    #[test]
    fn command_type_codes() {
        for code in 0..=u8::MAX {
            assert_eq!(CommandType::from(code).code(), code);
        }
        assert_eq!(CommandType::ToggleFan.to_string(), "toggle-fan");
        assert_eq!(CommandType::Other(0x10).to_string(), "other(0x10)");
    }
}
