//! Binary entry point: parses arguments, drives one pipeline run to
//! completion, and maps failures to the exit codes and output
//! placement spec §6/§7 require.
//!
//! Grounded on `seis-sim::main`'s `Cli::parse()` + dispatch shape, with
//! the dispatch itself replaced: instead of branching on which `Args`
//! group is present, this binary runs [`orchestrator::run`] and maps its
//! `Result` to an exit code.

mod cli;
mod input;
mod orchestrator;

use clap::{CommandFactory, Parser};
use cli::Cli;
use lp_core::{log, Error};
use std::io::{self, BufReader};
use std::process::ExitCode as ProcessExitCode;

fn main() -> ProcessExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let message = e.to_string();
            return fail(Error::ArgError(
                message.lines().next().unwrap_or("invalid arguments").to_string(),
            ));
        }
    };

    if cli.queue_size == 0 {
        return fail(Error::ArgError(
            "queue_size must be a strictly positive integer".to_string(),
        ));
    }

    let stdin = io::stdin();
    let result = orchestrator::run(cli.queue_size, &cli.stages, BufReader::new(stdin.lock()));

    match result {
        Ok(()) => ProcessExitCode::from(0),
        Err(e) => fail(e),
    }
}

/// Logs `e` to standard error, prints the usage block to standard output
/// when `e`'s mapped exit code calls for it, and returns the process
/// exit code to use.
fn fail(e: Error) -> ProcessExitCode {
    log::log_error("pipeline", e.to_string());
    match e.exit_code() {
        Some(exit_code) => {
            if exit_code.prints_usage() {
                print_usage();
            }
            ProcessExitCode::from(exit_code.code() as u8)
        }
        // An in-flight error kind surfaced at the top level: not expected
        // from a well-formed orchestrator run, but treated as an internal
        // failure (no usage block) rather than panicking.
        None => ProcessExitCode::from(2),
    }
}

/// Prints the usage block to standard output, per spec §7's rule that
/// `ArgError`/`ResolveError` paths show usage and `InitError`/
/// `InternalError` paths never do.
fn print_usage() {
    let _ = Cli::command().print_help();
    println!();
}
