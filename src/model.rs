use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Total length of a card record
pub const RECORD_LEN: usize = 16;
/// Length of the little-endian checksum field at the start of a record
pub const CHECKSUM_LEN: usize = 2;
/// Length of the overwritable tail field at the end of a record
pub const TAIL_LEN: usize = 3;
/// Offset of the tail field
pub const TAIL_OFFSET: usize = RECORD_LEN - TAIL_LEN;

/// CRC-16 parameter set
///
/// Fully determines the behaviour of [`compute`][crate::compute], there are no implicit defaults.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrcParameters {
    /// Generator polynomial, MSB-first notation without the implicit x^16 term
    pub polynomial: u16,
    pub initial_value: u16,
    /// Reflect each input byte before it enters the register
    pub reflect_input: bool,
    /// Reflect the 16-bit register after the last byte
    pub reflect_output: bool,
    /// Applied after the optional output reflection
    pub xor_out: u16,
}

impl CrcParameters {
    pub const MODBUS: Self = Self::new(0x8005, 0xFFFF, true, true, 0x0000);
    pub const CCITT: Self = Self::new(0x1021, 0xFFFF, false, false, 0x0000);
    pub const XMODEM: Self = Self::new(0x1021, 0x0000, false, false, 0x0000);
    pub const KERMIT: Self = Self::new(0x1021, 0x0000, true, true, 0x0000);
    pub const YP205_V1: Self = Self::new(0x1021, 0x366C, false, false, 0x0000);
    pub const YP205_V2: Self = Self::new(0x8005, 0x0000, true, true, 0x0000);
    pub const YP205_V3: Self = Self::new(0x8005, 0xFFFF, false, false, 0x0000);

    pub const fn new(
        polynomial: u16,
        initial_value: u16,
        reflect_input: bool,
        reflect_output: bool,
        xor_out: u16,
    ) -> Self {
        Self {
            polynomial,
            initial_value,
            reflect_input,
            reflect_output,
            xor_out,
        }
    }
}

/// Named parameter presets
///
/// | Preset  | Poly   | Init   | RefIn | RefOut | XorOut |
/// |---------|--------|--------|-------|--------|--------|
/// | Modbus  | 0x8005 | 0xFFFF | yes   | yes    | 0x0000 |
/// | Ccitt   | 0x1021 | 0xFFFF | no    | no     | 0x0000 |
/// | Xmodem  | 0x1021 | 0x0000 | no    | no     | 0x0000 |
/// | Kermit  | 0x1021 | 0x0000 | yes   | yes    | 0x0000 |
/// | Yp205V1 | 0x1021 | 0x366C | no    | no     | 0x0000 |
/// | Yp205V2 | 0x8005 | 0x0000 | yes   | yes    | 0x0000 |
/// | Yp205V3 | 0x8005 | 0xFFFF | no    | no     | 0x0000 |
///
/// The YP205 variants are guesses at the scheme of an undocumented card reader.
/// None of them is confirmed, see [`Preset::is_verified`].
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Preset {
    Modbus,
    Ccitt,
    Xmodem,
    Kermit,
    Yp205V1,
    Yp205V2,
    Yp205V3,
}

impl Preset {
    /// Every preset, in report order
    pub const ALL: [Preset; 7] = [
        Self::Modbus,
        Self::Ccitt,
        Self::Xmodem,
        Self::Kermit,
        Self::Yp205V1,
        Self::Yp205V2,
        Self::Yp205V3,
    ];

    pub const fn params(self) -> CrcParameters {
        match self {
            Self::Modbus => CrcParameters::MODBUS,
            Self::Ccitt => CrcParameters::CCITT,
            Self::Xmodem => CrcParameters::XMODEM,
            Self::Kermit => CrcParameters::KERMIT,
            Self::Yp205V1 => CrcParameters::YP205_V1,
            Self::Yp205V2 => CrcParameters::YP205_V2,
            Self::Yp205V3 => CrcParameters::YP205_V3,
        }
    }

    /// Label used in reports
    pub const fn name(self) -> &'static str {
        match self {
            Self::Modbus => "CRC-16 Modbus",
            Self::Ccitt => "CRC-16 CCITT",
            Self::Xmodem => "CRC-16 XMODEM",
            Self::Kermit => "CRC-16 Kermit",
            Self::Yp205V1 => "YP205 Variant 1",
            Self::Yp205V2 => "YP205 Variant 2",
            Self::Yp205V3 => "YP205 Variant 3",
        }
    }

    /// Key accepted by [`FromStr`]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Modbus => "modbus",
            Self::Ccitt => "ccitt",
            Self::Xmodem => "xmodem",
            Self::Kermit => "kermit",
            Self::Yp205V1 => "yp205-v1",
            Self::Yp205V2 => "yp205-v2",
            Self::Yp205V3 => "yp205-v3",
        }
    }

    /// Whether the preset is a published CRC-16 or an exploratory reader guess
    pub const fn is_verified(self) -> bool {
        !matches!(self, Self::Yp205V1 | Self::Yp205V2 | Self::Yp205V3)
    }
}

impl From<Preset> for CrcParameters {
    fn from(value: Preset) -> Self {
        value.params()
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let keys: Vec<&str> = Self::ALL.iter().map(|p| p.key()).collect();
                format!("unknown preset {s:?}, expected one of: {}", keys.join(", "))
            })
    }
}

/// 16 byte access card UID record
///
/// | Bytes    | Field                              |
/// |----------|------------------------------------|
/// | `0..2`   | checksum, little-endian            |
/// | `2..13`  | body                               |
/// | `13..16` | tail, overwritten when patching    |
///
/// The checksum covers `2..16`, it never includes itself.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardRecord {
    bytes: [u8; RECORD_LEN],
}

impl CardRecord {
    pub const fn new(bytes: [u8; RECORD_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.bytes
    }

    pub fn into_bytes(self) -> [u8; RECORD_LEN] {
        self.bytes
    }

    /// Value currently stored in the checksum field
    pub fn checksum_field(&self) -> u16 {
        u16::from_le_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn body(&self) -> &[u8] {
        &self.bytes[CHECKSUM_LEN..TAIL_OFFSET]
    }

    pub fn tail(&self) -> &[u8] {
        &self.bytes[TAIL_OFFSET..]
    }

    /// Body and tail, the range the checksum is computed over
    pub fn checksummed_range(&self) -> &[u8] {
        &self.bytes[CHECKSUM_LEN..]
    }

    pub(crate) fn set_tail(&mut self, tail: [u8; TAIL_LEN]) {
        self.bytes[TAIL_OFFSET..].copy_from_slice(&tail);
    }

    pub(crate) fn set_checksum_field(&mut self, crc: u16) {
        self.bytes[..CHECKSUM_LEN].copy_from_slice(&crc.to_le_bytes());
    }
}

impl From<[u8; RECORD_LEN]> for CardRecord {
    fn from(value: [u8; RECORD_LEN]) -> Self {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for CardRecord {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; RECORD_LEN] = value.try_into().map_err(|_| Error::LengthMismatch {
            expected: RECORD_LEN,
            actual: value.len(),
        })?;
        Ok(Self::new(bytes))
    }
}

impl AsRef<[u8]> for CardRecord {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
