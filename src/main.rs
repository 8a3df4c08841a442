/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Main executable for epr-gen

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args = epr_gen::cli::Args::parse();
    epr_gen::cli::run(&args)?;

    Ok(())
}
