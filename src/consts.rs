//! Константы формата контейнера записей.
//!
//! Кадр (frame), все поля LE:
//! [len u64][len_crc u32][payload len байт][payload_crc u32]
//!
//! - len_crc     — masked CRC32C по 8 байтам поля len;
//! - payload_crc — masked CRC32C по байтам payload.
//!
//! Заголовка/футера/глобального индекса в файле нет: кадры идут подряд с offset 0.

// -------- Frame layout --------
pub const FRAME_LEN_SIZE: usize = 8;
pub const FRAME_CRC_SIZE: usize = 4;

/// [len u64][len_crc u32] — всё, что нужно прочитать, чтобы перешагнуть кадр.
pub const FRAME_HDR_SIZE: usize = FRAME_LEN_SIZE + FRAME_CRC_SIZE;

/// Полный оверхед кадра: header (12) + payload_crc (4).
pub const FRAME_OVERHEAD: u64 = (FRAME_HDR_SIZE + FRAME_CRC_SIZE) as u64;

// -------- Checksum mask --------
pub const CRC_MASK_DELTA: u32 = 0xa282_ead8;

// -------- Byte window --------
pub const DEFAULT_WINDOW_CAPACITY: usize = 128 * 1024;

/// Окно должно вмещать хотя бы один пустой кадр целиком.
pub const MIN_WINDOW_CAPACITY: usize = FRAME_OVERHEAD as usize;
