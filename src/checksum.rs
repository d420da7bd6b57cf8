//! checksum — masked CRC32C, которым защищены поле длины и payload каждого кадра.
//!
//! mask(crc) = ((crc >> 15) | (crc << 17)) + 0xa282ead8 (mod 2^32).
//! Сравнение — только побитовое равенство, без допусков.

use crate::consts::CRC_MASK_DELTA;

#[inline]
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(CRC_MASK_DELTA)
}

#[inline]
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(CRC_MASK_DELTA).rotate_left(15)
}

/// masked CRC32C по срезу.
#[inline]
pub fn masked_crc32c(bytes: &[u8]) -> u32 {
    mask(crc32c::crc32c(bytes))
}

/// Пересчитать masked CRC и сравнить с сохранённым.
/// Ok(()) при совпадении, иначе Err(computed) — вызывающий код строит ошибку с offset.
#[inline]
pub fn verify(bytes: &[u8], stored: u32) -> Result<(), u32> {
    let computed = masked_crc32c(bytes);
    if computed == stored {
        Ok(())
    } else {
        Err(computed)
    }
}
