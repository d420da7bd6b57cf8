use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reader/indexer for scenario record containers
#[derive(Parser, Debug)]
#[command(name = "screc", version, about = "Scenario record container tool")]
pub struct Cli {
    /// Byte window capacity (overrides SCREC_WINDOW_BYTES)
    #[arg(long, global = true)]
    pub window_bytes: Option<usize>,
    /// Checksum policy: strict | relaxed | off (overrides SCREC_CHECKSUM)
    #[arg(long, global = true)]
    pub checksum: Option<String>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print the offset of every frame (or only their count)
    Index {
        #[arg(long)]
        path: PathBuf,
        /// Print only the number of frames
        #[arg(long, default_value_t = false)]
        count: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List records: offset, payload length and a hex prefix of the payload
    ///
    /// Пример:
    ///   screc dump --path ./a.tfrecord --start 1234 --limit 10 --json
    Dump {
        #[arg(long)]
        path: PathBuf,
        /// Frame-start offset to resume from (from `screc index`)
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Maximum number of records to print
        #[arg(long)]
        limit: Option<usize>,
        /// JSONL output (one object per record)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Full scan verifying both checksums of every frame
    Verify {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// File size, frame count, reader config and counters
    Status {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
