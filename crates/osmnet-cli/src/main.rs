//! # osmnet
//!
//! Command-line front end for the osmnet engine: routing, matrices,
//! isochrones, network analyses, and feature lookups over a local map
//! extract.
//!
//! Exit codes: 0 success, 1 valid query without an answer, 2 invalid input,
//! 3 missing or unusable map data.

use clap::Parser;
use log::LevelFilter;

use osmnet_core::{NetError, ResultClass};
use osmnet_output::OutputError;

mod args;
mod commands;
mod input;


use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let class = match commands::run(&cli) {
        Ok(class) => class,
        Err(err) => {
            eprintln!("error: {err:#}");
            classify(&err)
        }
    };
    std::process::exit(class.exit_code());
}

/// Log to stderr so stdout carries only the rendered result.
fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.target(env_logger::Target::Stderr);
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Map a failed command onto its result class.
fn classify(err: &anyhow::Error) -> ResultClass {
    if let Some(e) = err.downcast_ref::<NetError>() {
        return e.kind().into();
    }
    match err.downcast_ref::<OutputError>() {
        Some(OutputError::Unsupported { .. }) => ResultClass::InvalidInput,
        _ => ResultClass::NoData,
    }
}
