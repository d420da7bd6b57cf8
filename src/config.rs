//! config — настройки ридера.
//!
//! Цели:
//! - Одна точка для параметров вместо разбросанных чтений env.
//! - ReaderConfig::from_env() читает SCREC_*; fluent-сеттеры их перекрывают.
//!
//! По умолчанию:
//! - window_capacity = 128 KiB (env SCREC_WINDOW_BYTES)
//! - checksum = strict (env SCREC_CHECKSUM = strict|relaxed|off)
//!
//! ChecksumPolicy::Off — единственный способ отключить проверку; неявно не выбирается.

use std::fmt;

use crate::consts::{DEFAULT_WINDOW_CAPACITY, MIN_WINDOW_CAPACITY};

/// How frame checksums are verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Verify the length checksum before trusting the length, then the payload checksum.
    #[default]
    Strict,
    /// Trust the length as read; verify the payload checksum only.
    Relaxed,
    /// Verify nothing. Throughput opt-out for trusted files.
    Off,
}

impl ChecksumPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "1" | "on" | "true" | "yes" => Some(ChecksumPolicy::Strict),
            "relaxed" | "payload" => Some(ChecksumPolicy::Relaxed),
            "off" | "0" | "false" | "no" => Some(ChecksumPolicy::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumPolicy::Strict => "strict",
            ChecksumPolicy::Relaxed => "relaxed",
            ChecksumPolicy::Off => "off",
        }
    }

    #[inline]
    pub fn verifies_length(&self) -> bool {
        matches!(self, ChecksumPolicy::Strict)
    }

    #[inline]
    pub fn verifies_payload(&self) -> bool {
        !matches!(self, ChecksumPolicy::Off)
    }
}

impl fmt::Display for ChecksumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for one container handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Capacity of the reusable byte window in bytes.
    /// Env: SCREC_WINDOW_BYTES (default 131072, minimum 16)
    pub window_capacity: usize,

    /// Checksum verification policy.
    /// Env: SCREC_CHECKSUM = strict|relaxed|off (default strict)
    pub checksum: ChecksumPolicy,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            checksum: ChecksumPolicy::Strict,
        }
    }
}

impl ReaderConfig {
    /// Load configuration from environment variables. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SCREC_WINDOW_BYTES") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.window_capacity = n.max(MIN_WINDOW_CAPACITY);
            }
        }

        if let Ok(v) = std::env::var("SCREC_CHECKSUM") {
            if let Some(p) = ChecksumPolicy::parse(&v) {
                cfg.checksum = p;
            }
        }

        cfg
    }

    pub fn with_window_capacity(mut self, bytes: usize) -> Self {
        self.window_capacity = bytes.max(MIN_WINDOW_CAPACITY);
        self
    }

    pub fn with_checksum(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum = policy;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReaderConfig {{ window_capacity: {}, checksum: {} }}",
            self.window_capacity, self.checksum
        )
    }
}
