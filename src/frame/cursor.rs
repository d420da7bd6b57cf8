//! frame/cursor — обход кадров контейнера поверх WindowedSource.
//!
//! Общий шаг next_frame(pos) используется и потоком записей (RecordStream), и
//! индексом (FrameOffsets), поэтому оба режима одинаково видят границы кадров.
//!
//! Возвраты next_frame:
//!   * Ok(Some(FrameHeader)) — кадр целиком помещается в файл (и len_crc верен в Strict);
//!   * Ok(None)              — pos == file_len: нормальный конец контейнера;
//!   * Err(Truncated)        — от pos осталось меньше, чем требует заголовок или кадр;
//!   * Err(ChecksumMismatch) — len_crc не сошёлся (только Strict).
//!
//! После первой ошибки итераторы «гаснут» и дальше возвращают None.

use std::borrow::Cow;
use std::marker::PhantomData;

use byteorder::{ByteOrder, LittleEndian};
use log::warn;

use crate::checksum;
use crate::config::ChecksumPolicy;
use crate::consts::{FRAME_CRC_SIZE, FRAME_HDR_SIZE, FRAME_LEN_SIZE, FRAME_OVERHEAD};
use crate::error::{ChecksumField, RecordError, Result};
use crate::metrics::{
    record_checksum_failure, record_frame_streamed, record_frames_indexed, record_truncation,
};
use crate::source::WindowedSource;

use super::header::{decode_len_and_crc, FrameHeader};
use super::Record;

fn truncated(offset: u64, needed: u64, file_len: u64) -> RecordError {
    warn!(
        "truncated frame at offset {} (needs {} bytes, file is {} bytes)",
        offset, needed, file_len
    );
    record_truncation();
    RecordError::Truncated {
        offset,
        needed,
        file_len,
    }
}

fn checksum_mismatch(offset: u64, field: ChecksumField, stored: u32, computed: u32) -> RecordError {
    warn!(
        "{} checksum mismatch at offset {} (stored={:#010x}, computed={:#010x})",
        field, offset, stored, computed
    );
    record_checksum_failure();
    RecordError::ChecksumMismatch {
        offset,
        field,
        stored,
        computed,
    }
}

/// Прочитать заголовок кадра с pos и проверить, что кадр целиком есть в файле.
pub fn next_frame(
    src: &mut WindowedSource,
    pos: u64,
    policy: ChecksumPolicy,
) -> Result<Option<FrameHeader>> {
    let file_len = src.file_len();
    if pos == file_len {
        return Ok(None);
    }
    if pos > file_len {
        return Err(RecordError::InvalidState(format!(
            "cursor {} is past end of container ({} bytes)",
            pos, file_len
        )));
    }
    if pos + FRAME_HDR_SIZE as u64 > file_len {
        return Err(truncated(pos, FRAME_HDR_SIZE as u64, file_len));
    }

    let hdr = src.read(pos, FRAME_HDR_SIZE)?;
    let (payload_len, stored) = decode_len_and_crc(&hdr);

    // Длину проверяем ДО того, как по ней что-либо читать.
    if policy.verifies_length() {
        if let Err(computed) = checksum::verify(&hdr[..FRAME_LEN_SIZE], stored) {
            return Err(checksum_mismatch(pos, ChecksumField::Length, stored, computed));
        }
    }

    let needed = FRAME_OVERHEAD.checked_add(payload_len);
    match needed.and_then(|n| pos.checked_add(n)) {
        Some(end) if end <= file_len => Ok(Some(FrameHeader {
            offset: pos,
            payload_len,
        })),
        _ => Err(truncated(pos, needed.unwrap_or(u64::MAX), file_len)),
    }
}

/// Прочитать payload кадра (и его CRC одним запросом), проверить по политике.
pub fn read_payload<'a>(
    src: &'a mut WindowedSource,
    frame: &FrameHeader,
    policy: ChecksumPolicy,
) -> Result<Cow<'a, [u8]>> {
    let len = usize::try_from(frame.payload_len).map_err(|_| {
        RecordError::InvalidState(format!(
            "payload of {} bytes at offset {} does not fit in memory",
            frame.payload_len, frame.offset
        ))
    })?;

    let with_crc = len.checked_add(FRAME_CRC_SIZE).ok_or_else(|| {
        RecordError::InvalidState(format!(
            "payload of {} bytes at offset {} does not fit in memory",
            frame.payload_len, frame.offset
        ))
    })?;
    let bytes = src.read(frame.payload_offset(), with_crc)?;
    let stored = LittleEndian::read_u32(&bytes[len..]);

    if policy.verifies_payload() {
        if let Err(computed) = checksum::verify(&bytes[..len], stored) {
            return Err(checksum_mismatch(
                frame.offset,
                ChecksumField::Payload,
                stored,
                computed,
            ));
        }
    }

    Ok(match bytes {
        Cow::Borrowed(b) => Cow::Borrowed(&b[..len]),
        Cow::Owned(mut v) => {
            v.truncate(len);
            Cow::Owned(v)
        }
    })
}

// -------------------- Stream mode --------------------

/// Ленивый, конечный, только-вперёд поток декодированных записей.
///
/// Перезапуск — новым потоком с offset начала кадра (например, из индекса).
pub struct RecordStream<'a, T, E, F> {
    src: &'a mut WindowedSource,
    pos: u64,
    policy: ChecksumPolicy,
    decode: F,
    done: bool,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<'a, T, E, F> RecordStream<'a, T, E, F>
where
    F: FnMut(&[u8]) -> std::result::Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    pub fn new(src: &'a mut WindowedSource, start: u64, policy: ChecksumPolicy, decode: F) -> Self {
        Self {
            src,
            pos: start,
            policy,
            decode,
            done: false,
            _marker: PhantomData,
        }
    }

    /// Offset, с которого будет прочитана следующая запись.
    pub fn position(&self) -> u64 {
        self.pos
    }

    fn step(&mut self) -> Result<Option<Record<T>>> {
        let frame = match next_frame(self.src, self.pos, self.policy)? {
            Some(f) => f,
            None => return Ok(None),
        };
        let payload = read_payload(self.src, &frame, self.policy)?;
        let value = (self.decode)(&payload[..]).map_err(|e| RecordError::Decode {
            offset: frame.offset,
            source: e.into(),
        })?;

        record_frame_streamed(frame.payload_len);
        self.pos = frame.next_offset();
        Ok(Some(Record {
            offset: frame.offset,
            payload_len: frame.payload_len,
            value,
        }))
    }
}

impl<'a, T, E, F> Iterator for RecordStream<'a, T, E, F>
where
    F: FnMut(&[u8]) -> std::result::Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Item = Result<Record<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, T, E, F> std::iter::FusedIterator for RecordStream<'a, T, E, F>
where
    F: FnMut(&[u8]) -> std::result::Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
}

// -------------------- Index mode --------------------

/// Ленивый обход offset'ов кадров: читает только заголовки, payload не трогает.
pub struct FrameOffsets<'a> {
    src: &'a mut WindowedSource,
    pos: u64,
    policy: ChecksumPolicy,
    seen: u64,
    done: bool,
}

impl<'a> FrameOffsets<'a> {
    pub fn new(src: &'a mut WindowedSource, start: u64, policy: ChecksumPolicy) -> Self {
        Self {
            src,
            pos: start,
            policy,
            seen: 0,
            done: false,
        }
    }

    fn finish(&mut self) {
        self.done = true;
        record_frames_indexed(self.seen);
    }
}

impl<'a> Iterator for FrameOffsets<'a> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match next_frame(self.src, self.pos, self.policy) {
            Ok(Some(frame)) => {
                self.pos = frame.next_offset();
                self.seen += 1;
                Some(Ok(frame.offset))
            }
            Ok(None) => {
                self.finish();
                None
            }
            Err(e) => {
                self.finish();
                Some(Err(e))
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for FrameOffsets<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn oversized_payload_len_is_rejected_before_reading() -> std::io::Result<()> {
        // Файл не читается: ошибка возникает на вычислении размера запроса.
        let file = File::open(std::env::current_exe()?)?;
        let mut src = WindowedSource::with_len(file, u64::MAX, 64);
        let frame = FrameHeader {
            offset: 0,
            payload_len: u64::MAX,
        };
        match read_payload(&mut src, &frame, ChecksumPolicy::Off) {
            Err(RecordError::InvalidState(msg)) => assert!(msg.contains("does not fit")),
            other => panic!("expected InvalidState, got {:?}", other.map(|b| b.len())),
        }
        Ok(())
    }
}
