use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    engine::compute,
    error::{Error, Result},
    model::Preset,
};

/// Length of the byte sequence compared across presets
pub const VARIANT_INPUT_LEN: usize = 14;

/// Checksum of one preset over the compared input
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariantReport {
    pub preset: Preset,
    pub crc: u16,
}

impl VariantReport {
    pub fn high(&self) -> u8 {
        (self.crc >> 8) as u8
    }

    pub fn low(&self) -> u8 {
        (self.crc & 0xFF) as u8
    }

    /// Bytes as sent on the wire, low byte first
    pub fn transmission_order(&self) -> [u8; 2] {
        self.crc.to_le_bytes()
    }
}

impl fmt::Display for VariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.transmission_order();
        write!(
            f,
            "{:20}: 0x{:04X} | high: 0x{:02X} low: 0x{:02X} | transmission order: 0x{:02X} 0x{:02X}",
            self.preset.name(),
            self.crc,
            self.high(),
            self.low(),
            first,
            second
        )
    }
}

/// Compute the checksum of `data` under every [`Preset`], in [`Preset::ALL`] order
///
/// # Errors
///
/// [`Error::LengthMismatch`] when `data` is not 14 bytes.
pub fn compare_variants(data: &[u8]) -> Result<Vec<VariantReport>> {
    Error::check_len(VARIANT_INPUT_LEN, data.len())?;

    Ok(Preset::ALL
        .into_iter()
        .map(|preset| {
            let crc = compute(data, &preset.params());
            log::trace!("{}: 0x{crc:04X}", preset.name());
            VariantReport { preset, crc }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_all_presets() {
        let input = hex::decode("3000100000000000000000590406").unwrap();
        let reports = compare_variants(&input).unwrap();
        let crcs: Vec<(Preset, u16)> = reports.iter().map(|r| (r.preset, r.crc)).collect();
        assert_eq!(
            crcs,
            vec![
                (Preset::Modbus, 0x1F08),
                (Preset::Ccitt, 0xA95F),
                (Preset::Xmodem, 0x0035),
                (Preset::Kermit, 0x7B1B),
                (Preset::Yp205V1, 0x2925),
                (Preset::Yp205V2, 0x1EA3),
                (Preset::Yp205V3, 0xFEA8),
            ]
        );
    }

    #[test]
    fn byte_split() {
        let report = VariantReport {
            preset: Preset::Modbus,
            crc: 0x1F08,
        };
        assert_eq!(report.high(), 0x1F);
        assert_eq!(report.low(), 0x08);
        assert_eq!(report.transmission_order(), [0x08, 0x1F]);
        assert_eq!(
            report.to_string(),
            "CRC-16 Modbus       : 0x1F08 | high: 0x1F low: 0x08 | transmission order: 0x08 0x1F"
        );
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            compare_variants(&[0u8; 13]),
            Err(Error::LengthMismatch {
                expected: 14,
                actual: 13
            })
        );
    }
}
