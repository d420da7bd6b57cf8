use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use scenario_records::{Container, ReaderConfig};

use super::util::hex_preview;

#[derive(Serialize)]
struct DumpLine {
    offset: u64,
    payload_len: u64,
    payload_hex: String,
}

pub fn exec(
    path: PathBuf,
    cfg: ReaderConfig,
    start: u64,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut c = Container::with_config(&path, cfg);
    let stream = c
        .stream_raw(start)
        .with_context(|| format!("stream {} from offset {}", path.display(), start))?;

    let mut printed = 0usize;
    for rec in stream.take(limit.unwrap_or(usize::MAX)) {
        // Ошибка чтения — это не «конец потока»: выходим с ошибкой.
        let rec = rec.with_context(|| format!("read {}", path.display()))?;
        let line = DumpLine {
            offset: rec.offset,
            payload_len: rec.payload_len,
            payload_hex: hex_preview(&rec.value),
        };
        if json {
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!(
                "offset={} len={} payload={}",
                line.offset, line.payload_len, line.payload_hex
            );
        }
        printed += 1;
    }

    if !json && printed == 0 {
        println!("(no records)");
    }
    Ok(())
}
