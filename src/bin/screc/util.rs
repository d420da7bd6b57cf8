use anyhow::{anyhow, Result};

use scenario_records::{ChecksumPolicy, ReaderConfig};

/// Сколько байт payload показывать в dump.
pub const HEX_PREVIEW_BYTES: usize = 16;

/// ENV (SCREC_*) + переопределения из аргументов CLI.
pub fn reader_config(window_bytes: Option<usize>, checksum: Option<&str>) -> Result<ReaderConfig> {
    let mut cfg = ReaderConfig::from_env();
    if let Some(n) = window_bytes {
        cfg = cfg.with_window_capacity(n);
    }
    if let Some(s) = checksum {
        let policy = ChecksumPolicy::parse(s)
            .ok_or_else(|| anyhow!("unknown checksum policy '{}' (strict|relaxed|off)", s))?;
        cfg = cfg.with_checksum(policy);
    }
    Ok(cfg.build())
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Hex первых HEX_PREVIEW_BYTES байт, с "..." если payload длиннее.
pub fn hex_preview(bytes: &[u8]) -> String {
    if bytes.len() <= HEX_PREVIEW_BYTES {
        to_hex(bytes)
    } else {
        format!("{}...", to_hex(&bytes[..HEX_PREVIEW_BYTES]))
    }
}
