use crate::{
    crc16_modbus,
    error::{Error, Result},
    model::{CardRecord, RECORD_LEN, TAIL_LEN},
};

impl CardRecord {
    /// Checksum the stored field should hold for the current body and tail
    pub fn compute_checksum(&self) -> u16 {
        crc16_modbus(self.checksummed_range())
    }

    /// Whether the checksum field matches the body and tail
    pub fn verify(&self) -> bool {
        self.checksum_field() == self.compute_checksum()
    }

    /// Overwrite the tail, then recompute the checksum over bytes `2..16`
    /// and store it little-endian in bytes `0..2`
    ///
    /// Returns the checksum written.
    pub fn patch_tail(&mut self, tail: [u8; TAIL_LEN]) -> u16 {
        self.set_tail(tail);
        let crc = self.compute_checksum();
        self.set_checksum_field(crc);
        log::debug!("patched card record tail {tail:02X?}, checksum 0x{crc:04X}");
        crc
    }
}

/// Patch the tail of a raw record and write its checksum back
///
/// Both lengths are checked before anything is built, the record first.
/// Returns the patched record and the checksum written into it.
///
/// # Errors
///
/// [`Error::LengthMismatch`] when `record` is not 16 bytes or `new_tail` is not 3 bytes.
pub fn patch_and_checksum(record: &[u8], new_tail: &[u8]) -> Result<(CardRecord, u16)> {
    Error::check_len(RECORD_LEN, record.len())?;
    Error::check_len(TAIL_LEN, new_tail.len())?;

    let mut record = CardRecord::try_from(record)?;
    let mut tail = [0u8; TAIL_LEN];
    tail.copy_from_slice(new_tail);

    let crc = record.patch_tail(tail);
    Ok((record, crc))
}
