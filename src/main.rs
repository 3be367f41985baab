#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

mod annotate;
mod cli;
mod depth;
mod error;
mod info;
mod log_utils;
mod output;
mod process;
mod table;
mod trim;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli()?;
    process::process_data(cfg)
}
