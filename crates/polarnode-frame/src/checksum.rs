//! Integrity codes appended to every frame.
//!
//! Two families exist across protocol versions:
//! - CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF), transmitted big-endian
//! - XOR-8, a single accumulator byte

use bytes::{BufMut, BytesMut};

const CRC16_POLY: u16 = 0x1021;
const CRC16_INIT: u16 = 0xFFFF;

/// CRC-16/CCITT-FALSE over `bytes`.
pub fn crc16_ccitt_false(bytes: &[u8]) -> u16 {
    let mut crc = CRC16_INIT;
    for &b in bytes {
        crc ^= (b as u16) << 8;
        for _ in 0..8 {
            if (crc & 0x8000) != 0 {
                crc = (crc << 1) ^ CRC16_POLY;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// XOR of every byte in `bytes`, starting from zero.
pub fn xor8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Checksum family paired with a protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumKind {
    /// CRC-16/CCITT-FALSE, 2 bytes big-endian.
    Crc16,
    /// XOR-8, 1 byte.
    Xor8,
}

impl ChecksumKind {
    /// Number of trailing bytes this checksum occupies on the wire.
    pub const fn size(self) -> usize {
        match self {
            ChecksumKind::Crc16 => 2,
            ChecksumKind::Xor8 => 1,
        }
    }

    /// Compute the checksum over `payload`, widened to `u16`.
    pub fn compute(self, payload: &[u8]) -> u16 {
        match self {
            ChecksumKind::Crc16 => crc16_ccitt_false(payload),
            ChecksumKind::Xor8 => xor8(payload) as u16,
        }
    }

    /// Compute the checksum over the bytes already in `dst` and append it in wire order.
    pub fn append(self, dst: &mut BytesMut) {
        match self {
            ChecksumKind::Crc16 => {
                let crc = crc16_ccitt_false(dst);
                dst.put_u16(crc);
            }
            ChecksumKind::Xor8 => {
                let x = xor8(dst);
                dst.put_u8(x);
            }
        }
    }

    /// Read a big-endian trailer of [`size`](Self::size) bytes.
    fn read_trailer(trailer: &[u8]) -> u16 {
        trailer.iter().fold(0u16, |acc, &b| (acc << 8) | b as u16)
    }

    /// Split `message` into payload and trailer, then compare checksums.
    ///
    /// Returns the payload on success. `message` must be at least
    /// [`size`](Self::size) bytes long.
    pub(crate) fn verify(self, message: &[u8]) -> crate::Result<&[u8]> {
        let (payload, trailer) = message.split_at(message.len() - self.size());
        let expected = Self::read_trailer(trailer);
        let computed = self.compute(payload);
        if expected != computed {
            return Err(crate::FrameError::ChecksumMismatch { expected, computed });
        }
        Ok(payload)
    }
}

impl std::fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumKind::Crc16 => f.write_str("crc16"),
            ChecksumKind::Xor8 => f.write_str("xor8"),
        }
    }
}
