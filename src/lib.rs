#![doc = include_str!("../README.md")]
mod engine;
mod error;
mod model;
pub mod parser;
mod record;
mod stream;
mod variant;

pub use engine::*;
pub use error::*;
pub use model::*;
pub use record::*;
pub use stream::*;
pub use variant::*;

/// CRC-16/MODBUS, LSB-first
///
/// Uses the 0xA001 polynomial (0x8005 reflected) with 0xFFFF as initial value,
/// equivalent to [`compute`] with [`CrcParameters::MODBUS`].
pub fn crc16_modbus(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= byte as u16;
        for _bit in 0..8 {
            let carry = crc & 1;
            crc >>= 1;
            if carry != 0 {
                crc ^= 0xA001;
            }
        }
    }
    crc
}
