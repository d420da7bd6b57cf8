use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use scenario_records::metrics::{self, MetricsSnapshot};
use scenario_records::{Container, ReaderConfig};

#[derive(Serialize)]
struct Status {
    path: String,
    file_len: u64,
    frames: usize,
    window_capacity: usize,
    checksum: &'static str,
    metrics: MetricsSnapshot,
}

pub fn exec(path: PathBuf, cfg: ReaderConfig, json: bool) -> Result<()> {
    let mut c = Container::with_config(&path, cfg);
    let file_len = c.file_len()?;
    let frames = c.count()?;

    let st = Status {
        path: path.display().to_string(),
        file_len,
        frames,
        window_capacity: c.config().window_capacity,
        checksum: c.config().checksum.as_str(),
        metrics: metrics::snapshot(),
    };
    c.close();

    if json {
        println!("{}", serde_json::to_string(&st)?);
        return Ok(());
    }

    println!("path            = {}", st.path);
    println!("file_len        = {}", st.file_len);
    println!("frames          = {}", st.frames);
    println!("window_capacity = {}", st.window_capacity);
    println!("checksum        = {}", st.checksum);
    println!(
        "window          = hits {} / refills {} (hit ratio {:.2}), direct reads {}",
        st.metrics.window_hits,
        st.metrics.window_refills,
        st.metrics.window_hit_ratio(),
        st.metrics.direct_reads
    );
    Ok(())
}
