//! frame/header — разбор 12-байтового заголовка кадра и геометрия кадра.

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{FRAME_HDR_SIZE, FRAME_LEN_SIZE, FRAME_OVERHEAD};

/// Положение одного кадра в файле.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Offset первого байта поля len.
    pub offset: u64,
    pub payload_len: u64,
}

impl FrameHeader {
    #[inline]
    pub fn payload_offset(&self) -> u64 {
        self.offset + FRAME_HDR_SIZE as u64
    }

    #[inline]
    pub fn payload_crc_offset(&self) -> u64 {
        self.payload_offset() + self.payload_len
    }

    /// Полный размер кадра на диске: 16 + len.
    #[inline]
    pub fn frame_len(&self) -> u64 {
        FRAME_OVERHEAD + self.payload_len
    }

    /// Offset следующего кадра.
    #[inline]
    pub fn next_offset(&self) -> u64 {
        self.offset + self.frame_len()
    }
}

/// [len u64][len_crc u32] -> (len, stored len_crc). hdr должен быть длиной FRAME_HDR_SIZE.
#[inline]
pub fn decode_len_and_crc(hdr: &[u8]) -> (u64, u32) {
    let len = LittleEndian::read_u64(&hdr[..FRAME_LEN_SIZE]);
    let crc = LittleEndian::read_u32(&hdr[FRAME_LEN_SIZE..FRAME_HDR_SIZE]);
    (len, crc)
}
