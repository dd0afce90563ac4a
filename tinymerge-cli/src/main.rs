mod app;
mod commands;
mod output;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A merge stops at the next phase boundary. A second interrupt, or one during any other
    // command, exits at once
    let cancelled = Arc::new(AtomicBool::new(false));
    let cooperative = matches!(cli.command, Command::Merge(_));
    let flag = Arc::clone(&cancelled);
    ctrlc::set_handler(move || {
        if !cooperative || flag.swap(true, Ordering::SeqCst) {
            eprintln!("\nCancelled.");
            std::process::exit(130);
        }
        eprintln!("\nCancelling...");
    })?;

    // Show tinymerge info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("tinymerge", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Merge(args) => commands::merge::run(args, &cli.global, cancelled),
        Command::Inspect { path } => commands::inspect::run(path, &cli.global),
    }
}
