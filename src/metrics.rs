//! Lightweight global metrics for the reader.
//!
//! Потокобезопасные атомарные счётчики:
//! - byte window (hits / refills / direct reads)
//! - frames (streamed / indexed)
//! - integrity (checksum failures / truncations)
//!
//! Счётчики только информационные: поведение от них не зависит.

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Window -----
static WINDOW_HITS: AtomicU64 = AtomicU64::new(0);
static WINDOW_REFILLS: AtomicU64 = AtomicU64::new(0);
static WINDOW_BYTES_READ: AtomicU64 = AtomicU64::new(0);
static DIRECT_READS: AtomicU64 = AtomicU64::new(0);
static DIRECT_BYTES_READ: AtomicU64 = AtomicU64::new(0);

// ----- Frames -----
static FRAMES_STREAMED: AtomicU64 = AtomicU64::new(0);
static PAYLOAD_BYTES_STREAMED: AtomicU64 = AtomicU64::new(0);
static FRAMES_INDEXED: AtomicU64 = AtomicU64::new(0);

// ----- Integrity -----
static CHECKSUM_FAILURES: AtomicU64 = AtomicU64::new(0);
static TRUNCATIONS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    pub window_hits: u64,
    pub window_refills: u64,
    pub window_bytes_read: u64,
    pub direct_reads: u64,
    pub direct_bytes_read: u64,

    pub frames_streamed: u64,
    pub payload_bytes_streamed: u64,
    pub frames_indexed: u64,

    pub checksum_failures: u64,
    pub truncations: u64,
}

impl MetricsSnapshot {
    pub fn window_hit_ratio(&self) -> f64 {
        let total = self.window_hits + self.window_refills;
        if total == 0 {
            0.0
        } else {
            self.window_hits as f64 / total as f64
        }
    }
}

// ----- Recorders (Window) -----
pub fn record_window_hit() {
    WINDOW_HITS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_window_refill(bytes: usize) {
    WINDOW_REFILLS.fetch_add(1, Ordering::Relaxed);
    WINDOW_BYTES_READ.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub fn record_direct_read(bytes: usize) {
    DIRECT_READS.fetch_add(1, Ordering::Relaxed);
    DIRECT_BYTES_READ.fetch_add(bytes as u64, Ordering::Relaxed);
}

// ----- Recorders (Frames) -----
pub fn record_frame_streamed(payload_len: u64) {
    FRAMES_STREAMED.fetch_add(1, Ordering::Relaxed);
    PAYLOAD_BYTES_STREAMED.fetch_add(payload_len, Ordering::Relaxed);
}

pub fn record_frames_indexed(n: u64) {
    FRAMES_INDEXED.fetch_add(n, Ordering::Relaxed);
}

// ----- Recorders (Integrity) -----
pub fn record_checksum_failure() {
    CHECKSUM_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_truncation() {
    TRUNCATIONS.fetch_add(1, Ordering::Relaxed);
}

/// Снимок всех счётчиков.
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        window_hits: WINDOW_HITS.load(Ordering::Relaxed),
        window_refills: WINDOW_REFILLS.load(Ordering::Relaxed),
        window_bytes_read: WINDOW_BYTES_READ.load(Ordering::Relaxed),
        direct_reads: DIRECT_READS.load(Ordering::Relaxed),
        direct_bytes_read: DIRECT_BYTES_READ.load(Ordering::Relaxed),

        frames_streamed: FRAMES_STREAMED.load(Ordering::Relaxed),
        payload_bytes_streamed: PAYLOAD_BYTES_STREAMED.load(Ordering::Relaxed),
        frames_indexed: FRAMES_INDEXED.load(Ordering::Relaxed),

        checksum_failures: CHECKSUM_FAILURES.load(Ordering::Relaxed),
        truncations: TRUNCATIONS.load(Ordering::Relaxed),
    }
}

