//! container — handle контейнера: жизненный цикл вокруг одного WindowedSource.
//!
//! Состояния:
//! - Unopened — создан с путём; первая операция открывает файл.
//! - Open     — владеет read-only файлом и окном байтов.
//! - Closed   — любая дальнейшая операция (включая open) даёт InvalidState.
//!
//! stream/offsets берут handle по &mut, поэтому одно окно обслуживает один обход
//! за раз. Для параллельных читателей — по handle на каждого.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::checksum;
use crate::config::{ChecksumPolicy, ReaderConfig};
use crate::consts::{FRAME_HDR_SIZE, FRAME_LEN_SIZE};
use crate::error::{RecordError, Result};
use crate::frame::header::decode_len_and_crc;
use crate::frame::{FrameOffsets, Record, RecordStream};
use crate::source::WindowedSource;

/// Decoder that copies the payload out unchanged.
pub type RawDecode = fn(&[u8]) -> std::result::Result<Vec<u8>, Infallible>;

/// Stream of owned payload bytes.
pub type RawStream<'a> = RecordStream<'a, Vec<u8>, Infallible, RawDecode>;

/// Payload decoder for raw byte streams.
pub fn copy_payload(bytes: &[u8]) -> std::result::Result<Vec<u8>, Infallible> {
    Ok(bytes.to_vec())
}

/// Outcome of a full strict scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub frames: u64,
    pub payload_bytes: u64,
    pub file_len: u64,
}

enum State {
    Unopened,
    Open(WindowedSource),
    Closed,
}

pub struct Container {
    path: PathBuf,
    cfg: ReaderConfig,
    state: State,
}

impl Container {
    /// Handle with default configuration. Nothing is opened yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, ReaderConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(path: P, cfg: ReaderConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cfg,
            state: State::Unopened,
        }
    }

    /// Create and open in one step.
    pub fn open_path<P: AsRef<Path>>(path: P, cfg: ReaderConfig) -> Result<Self> {
        let mut c = Self::with_config(path, cfg);
        c.open()?;
        Ok(c)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.cfg
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Open the file read-only and capture its size. Idempotent while open.
    pub fn open(&mut self) -> Result<()> {
        match self.state {
            State::Open(_) => Ok(()),
            State::Closed => Err(closed_err(&self.path)),
            State::Unopened => {
                let src = WindowedSource::open(&self.path, self.cfg.window_capacity)?;
                debug!(
                    "opened container {} ({} bytes, window {} bytes, checksum {})",
                    self.path.display(),
                    src.file_len(),
                    src.capacity(),
                    self.cfg.checksum
                );
                self.state = State::Open(src);
                Ok(())
            }
        }
    }

    /// Release the file. The handle cannot be reopened afterwards.
    pub fn close(&mut self) {
        if let State::Open(_) = self.state {
            debug!("closed container {}", self.path.display());
        }
        self.state = State::Closed;
    }

    /// File size captured at open time.
    pub fn file_len(&mut self) -> Result<u64> {
        Ok(self.source()?.file_len())
    }

    /// Lazy stream of decoded records starting at a frame-start offset.
    ///
    /// `start` must be 0, the file length (empty stream) or an offset previously
    /// observed as a frame start (from `index()` or `Record::offset`).
    pub fn stream<T, E, F>(&mut self, start: u64, decode: F) -> Result<RecordStream<'_, T, E, F>>
    where
        F: FnMut(&[u8]) -> std::result::Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let policy = self.cfg.checksum;
        let src = self.source()?;
        check_boundary(src, start, policy)?;
        Ok(RecordStream::new(src, start, policy, decode))
    }

    /// Stream of raw payload bytes.
    pub fn stream_raw(&mut self, start: u64) -> Result<RawStream<'_>> {
        self.stream(start, copy_payload as RawDecode)
    }

    /// Lazy walk over frame-start offsets from the beginning of the container.
    pub fn offsets(&mut self) -> Result<FrameOffsets<'_>> {
        let policy = self.cfg.checksum;
        let src = self.source()?;
        Ok(FrameOffsets::new(src, 0, policy))
    }

    /// Full offset index, recomputed on every call.
    pub fn index(&mut self) -> Result<Vec<u64>> {
        let offsets = self.offsets()?.collect::<Result<Vec<u64>>>()?;
        debug!("indexed {}: {} frames", self.path.display(), offsets.len());
        Ok(offsets)
    }

    /// Number of frames in the container.
    pub fn count(&mut self) -> Result<usize> {
        let mut n = 0usize;
        for off in self.offsets()? {
            off?;
            n += 1;
        }
        Ok(n)
    }

    /// Read exactly one record at a frame-start offset.
    pub fn record_at<T, E, F>(&mut self, offset: u64, decode: F) -> Result<Record<T>>
    where
        F: FnMut(&[u8]) -> std::result::Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        match self.stream(offset, decode)?.next() {
            Some(rec) => rec,
            None => Err(RecordError::InvalidState(format!(
                "no frame at offset {} (end of container)",
                offset
            ))),
        }
    }

    /// Read and verify every frame (both checksums) regardless of the configured policy.
    pub fn verify(&mut self) -> Result<VerifyReport> {
        let src = self.source()?;
        let file_len = src.file_len();
        let mut report = VerifyReport {
            frames: 0,
            payload_bytes: 0,
            file_len,
        };
        let decode = |_: &[u8]| Ok::<(), Infallible>(());
        for rec in RecordStream::new(src, 0, ChecksumPolicy::Strict, decode) {
            let rec = rec?;
            report.frames += 1;
            report.payload_bytes += rec.payload_len;
        }
        Ok(report)
    }

    fn source(&mut self) -> Result<&mut WindowedSource> {
        if let State::Unopened = self.state {
            self.open()?;
        }
        match &mut self.state {
            State::Open(src) => Ok(src),
            _ => Err(closed_err(&self.path)),
        }
    }
}

fn closed_err(path: &Path) -> RecordError {
    RecordError::InvalidState(format!("container {} is closed", path.display()))
}

/// Возобновление допустимо только с начала кадра. Заголовок по len_crc проверяем
/// лишь в Strict; Relaxed/Off доверяют длине так же, как обход с нуля, и для них
/// остаются только границы файла.
fn check_boundary(src: &mut WindowedSource, start: u64, policy: ChecksumPolicy) -> Result<()> {
    let file_len = src.file_len();
    if start > file_len {
        return Err(RecordError::InvalidState(format!(
            "offset {} is past end of container ({} bytes)",
            start, file_len
        )));
    }
    if start == 0 || start == file_len || !policy.verifies_length() {
        return Ok(());
    }
    if start + FRAME_HDR_SIZE as u64 > file_len {
        return Err(not_a_boundary(start));
    }
    let hdr = src.read(start, FRAME_HDR_SIZE)?;
    let (_, stored) = decode_len_and_crc(&hdr);
    checksum::verify(&hdr[..FRAME_LEN_SIZE], stored).map_err(|_| not_a_boundary(start))
}

fn not_a_boundary(offset: u64) -> RecordError {
    RecordError::InvalidState(format!("offset {} is not a frame boundary", offset))
}
