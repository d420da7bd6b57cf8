//! frame — кадры контейнера: геометрия заголовка и курсор обхода.
//!
//! Разделение:
//! - header.rs — FrameHeader (offset/len), разбор [len u64][len_crc u32].
//! - cursor.rs — next_frame (общий шаг), RecordStream (поток записей), FrameOffsets (индекс).

pub mod cursor;
pub mod header;

pub use cursor::{next_frame, read_payload, FrameOffsets, RecordStream};
pub use header::FrameHeader;

/// Одна декодированная запись и её положение в контейнере.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    /// Offset начала кадра; годится для возобновления потока.
    pub offset: u64,
    pub payload_len: u64,
    pub value: T,
}
