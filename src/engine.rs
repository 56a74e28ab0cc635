use crate::model::CrcParameters;

/// Reverse the bit order of a byte
pub const fn reflect8(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Reverse the bit order of the 16-bit register
pub const fn reflect16(value: u16) -> u16 {
    value.reverse_bits()
}

/// Generic CRC-16
///
/// Bit-serial, MSB-first over a 16-bit register:
/// - each byte (reflected first when `reflect_input`) is XORed into the high 8 bits
/// - eight shifts per byte, XORing `polynomial` whenever the bit shifted out was set
/// - the register is reflected when `reflect_output`, then XORed with `xor_out`
///
/// No length or range validation is done, excluding a checksum field from its own input is the caller's job.
///
/// [`CrcParameters::MODBUS`] is routed through [`crc16_modbus`][crate::crc16_modbus],
/// the LSB-first encoding of the same construction.
pub fn compute(data: &[u8], params: &CrcParameters) -> u16 {
    if *params == CrcParameters::MODBUS {
        return crate::crc16_modbus(data);
    }
    compute_bitwise(data, params)
}

pub(crate) fn compute_bitwise(data: &[u8], params: &CrcParameters) -> u16 {
    let mut crc = params.initial_value;
    for &byte in data {
        let byte = if params.reflect_input {
            reflect8(byte)
        } else {
            byte
        };
        crc ^= (byte as u16) << 8;
        for _bit in 0..8 {
            let carry = crc & 0x8000;
            crc <<= 1;
            if carry != 0 {
                crc ^= params.polynomial;
            }
        }
    }
    if params.reflect_output {
        crc = reflect16(crc);
    }
    crc ^ params.xor_out
}
