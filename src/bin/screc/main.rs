use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_index;
mod cmd_dump;
mod cmd_verify;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug screc index --path ./scenario.tfrecord
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let cfg = util::reader_config(cli.window_bytes, cli.checksum.as_deref())?;

    match cli.cmd {
        cli::Cmd::Index { path, count, json } =>
            cmd_index::exec(path, cfg, count, json),

        cli::Cmd::Dump { path, start, limit, json } =>
            cmd_dump::exec(path, cfg, start, limit, json),

        cli::Cmd::Verify { path, json } =>
            cmd_verify::exec(path, cfg, json),

        cli::Cmd::Status { path, json } =>
            cmd_status::exec(path, cfg, json),
    }
}
