use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use scenario_records::{Container, ReaderConfig};

pub fn exec(path: PathBuf, cfg: ReaderConfig, count_only: bool, json: bool) -> Result<()> {
    let mut c = Container::with_config(&path, cfg);

    if count_only {
        let n = c.count().with_context(|| format!("index {}", path.display()))?;
        if json {
            println!("{}", json!({ "path": path.display().to_string(), "frames": n }));
        } else {
            println!("{}", n);
        }
        return Ok(());
    }

    let offsets = c.index().with_context(|| format!("index {}", path.display()))?;
    if json {
        println!(
            "{}",
            json!({
                "path": path.display().to_string(),
                "frames": offsets.len(),
                "offsets": offsets,
            })
        );
    } else {
        for (i, off) in offsets.iter().enumerate() {
            println!("{}\t{}", i, off);
        }
    }
    Ok(())
}
