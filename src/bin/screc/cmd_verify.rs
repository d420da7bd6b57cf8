use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use scenario_records::{Container, ReaderConfig};

/// Полный строгий скан. Нарушение целостности печатается в отчёте и даёт ненулевой код выхода.
pub fn exec(path: PathBuf, cfg: ReaderConfig, json: bool) -> Result<()> {
    let mut c = Container::with_config(&path, cfg);

    match c.verify() {
        Ok(report) => {
            if json {
                println!("{}", json!({ "ok": true, "report": report }));
            } else {
                println!(
                    "ok: {} frames, {} payload bytes, {} bytes total",
                    report.frames, report.payload_bytes, report.file_len
                );
            }
            Ok(())
        }
        Err(e) if e.is_corruption() => {
            if json {
                println!("{}", json!({ "ok": false, "error": e.to_string() }));
            } else {
                println!("corrupt: {}", e);
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
