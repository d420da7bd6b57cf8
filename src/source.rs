//! source — оконный источник байтов поверх открытого файла контейнера.
//!
//! Назначение:
//! - Единственная точка файлового I/O для курсора кадров: read(offset, size).
//! - Минимизировать системные вызовы при последовательном чтении и оставаться
//!   корректным при переходе назад (возобновление потока с offset из индекса).
//!
//! Поведение read(offset, size):
//! - запрос целиком внутри окна [start, end)  → срез из буфера, без I/O и аллокаций;
//! - size <= capacity                         → перезаливка окна одним чтением, затем срез;
//!   у конца файла окно сдвигается назад (start = file_len - capacity), чтобы
//!   соседние чтения «назад» попадали в тот же буфер;
//! - size > capacity (крупный payload)        → отдельный буфер ровно size байт,
//!   окно не трогаем;
//! - offset + size > file_len                 → Truncated.
//!
//! file_len фиксируется при открытии: дописанные позже кадры этой сессии не видны.
//! Буфер окна аллоцируется один раз на время жизни источника.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use log::trace;

use crate::consts::MIN_WINDOW_CAPACITY;
use crate::error::{RecordError, Result};
use crate::metrics::{record_direct_read, record_window_hit, record_window_refill};

pub struct WindowedSource {
    file: File,
    file_len: u64,
    buf: Vec<u8>,
    start: u64,
    end: u64,
}

impl WindowedSource {
    /// Открыть файл только на чтение и зафиксировать его размер.
    pub fn open(path: &Path, capacity: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| RecordError::from_open(e, path.to_path_buf()))?;
        let md = file
            .metadata()
            .map_err(|e| RecordError::from_open(e, path.to_path_buf()))?;
        if !md.is_file() {
            return Err(RecordError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }
        Ok(Self::with_len(file, md.len(), capacity))
    }

    /// Источник поверх уже открытого файла с известной длиной.
    pub fn with_len(file: File, file_len: u64, capacity: usize) -> Self {
        let capacity = capacity.max(MIN_WINDOW_CAPACITY);
        Self {
            file,
            file_len,
            buf: vec![0u8; capacity],
            start: 0,
            end: 0,
        }
    }

    #[inline]
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Текущий диапазон файла, который представляет окно.
    #[inline]
    pub fn window(&self) -> Range<u64> {
        self.start..self.end
    }

    /// Прочитать size байт с абсолютного offset.
    pub fn read(&mut self, offset: u64, size: usize) -> Result<Cow<'_, [u8]>> {
        let want_end = match offset.checked_add(size as u64) {
            Some(e) if e <= self.file_len => e,
            _ => {
                return Err(RecordError::Truncated {
                    offset,
                    needed: size as u64,
                    file_len: self.file_len,
                })
            }
        };
        if size == 0 {
            return Ok(Cow::Borrowed(&[][..]));
        }

        if offset >= self.start && want_end <= self.end {
            record_window_hit();
            let lo = (offset - self.start) as usize;
            return Ok(Cow::Borrowed(&self.buf[lo..lo + size]));
        }

        if size <= self.capacity() {
            self.refill(offset)?;
            let lo = (offset - self.start) as usize;
            return Ok(Cow::Borrowed(&self.buf[lo..lo + size]));
        }

        // Крупный запрос: мимо окна
        trace!("direct read: offset={} size={}", offset, size);
        let mut out = vec![0u8; size];
        self.file.seek(SeekFrom::Start(offset))?;
        read_full(&mut self.file, &mut out, offset, self.file_len)?;
        record_direct_read(size);
        Ok(Cow::Owned(out))
    }

    fn refill(&mut self, offset: u64) -> Result<()> {
        let cap = self.capacity() as u64;
        // offset < file_len здесь гарантирован: size > 0 и offset + size <= file_len
        let start = if offset + cap > self.file_len {
            self.file_len.saturating_sub(cap)
        } else {
            offset
        };
        let end = (start + cap).min(self.file_len);
        let n = (end - start) as usize;

        // Пока идёт I/O окно недействительно: неудачное чтение не оставит устаревший диапазон.
        self.start = 0;
        self.end = 0;

        self.file.seek(SeekFrom::Start(start))?;
        read_full(&mut self.file, &mut self.buf[..n], start, self.file_len)?;

        trace!("window refill: [{}, {}) for offset {}", start, end, offset);
        record_window_refill(n);
        self.start = start;
        self.end = end;
        Ok(())
    }
}

/// read_exact с переводом короткого чтения в Truncated.
fn read_full(f: &mut File, buf: &mut [u8], offset: u64, file_len: u64) -> Result<()> {
    match f.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(RecordError::Truncated {
            offset,
            needed: buf.len() as u64,
            file_len,
        }),
        Err(e) => Err(RecordError::Io(e)),
    }
}
