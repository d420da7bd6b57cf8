// Общие помощники для интеграционных тестов: уникальные пути и кодировщик кадров.
// Библиотека только читает — кадры пишем здесь.
#![allow(dead_code)]

use std::fs::OpenOptions;
use std::io::Write;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};

use scenario_records::checksum::masked_crc32c;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn unique_file(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("screc-{prefix}-{pid}-{t}-{id}.tfrecord"))
}

/// [len u64][masked crc(len) u32][payload][masked crc(payload) u32]
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 16);
    let mut len = [0u8; 8];
    LittleEndian::write_u64(&mut len, payload.len() as u64);
    let mut crc = [0u8; 4];

    out.extend_from_slice(&len);
    LittleEndian::write_u32(&mut crc, masked_crc32c(&len));
    out.extend_from_slice(&crc);

    out.extend_from_slice(payload);
    LittleEndian::write_u32(&mut crc, masked_crc32c(payload));
    out.extend_from_slice(&crc);
    out
}

/// Содержимое контейнера и offset'ы кадров в нём.
pub fn encode_container(payloads: &[Vec<u8>]) -> (Vec<u8>, Vec<u64>) {
    let mut bytes = Vec::new();
    let mut offsets = Vec::with_capacity(payloads.len());
    for p in payloads {
        offsets.push(bytes.len() as u64);
        bytes.extend_from_slice(&encode_frame(p));
    }
    (bytes, offsets)
}

/// Временный файл контейнера; удаляется при drop.
pub struct TempContainer(PathBuf);

impl TempContainer {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Deref for TempContainer {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TempContainer {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempContainer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

pub fn write_bytes(prefix: &str, bytes: &[u8]) -> Result<TempContainer> {
    let path = unique_file(prefix);
    let mut f = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&path)?;
    let guard = TempContainer(path);
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(guard)
}

/// Записать контейнер из payload'ов; вернуть путь и ожидаемые offset'ы.
pub fn write_container(prefix: &str, payloads: &[Vec<u8>]) -> Result<(TempContainer, Vec<u64>)> {
    let (bytes, offsets) = encode_container(payloads);
    let path = write_bytes(prefix, &bytes)?;
    Ok((path, offsets))
}

/// Детерминированный payload: длина len, байты зависят от seed.
pub fn patterned(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}
