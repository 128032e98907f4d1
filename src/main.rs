//! shaderblob - compile shaders and embed the SPIR-V in a C header
//!
//! Usage: `shaderblob [OPTIONS] <shaders/tex.vert> <shaders/tex.frag> ...`
//!
//! Each shader is compiled with glslc and written to the output header as
//! `const char <Prefix><Stage><Name>[]`. Any failure aborts the whole batch
//! and leaves the existing header alone.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, LogLevelArg};
use shaderblob_config::Config;
use shaderblob_core::{Outcome, run_with_glslc};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", one_line(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: Option<LogLevelArg>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.to_level_filter());
    }
    builder.format_timestamp(None).init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.print_default_config {
        print!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Zero inputs is a no-op; not even a broken config file may fail it
    if cli.inputs.is_empty() {
        println!("No input files.");
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let outcome = run_with_glslc(
        &cli.inputs,
        &config.locator(),
        config.compiler.args.clone(),
        config.pipeline_options(),
    )?;

    match outcome {
        Outcome::NoInput => println!("No input files."),
        Outcome::Written { path, shaders, bytes } => {
            log::debug!("{} shader(s), {} bytes -> {:?}", shaders, bytes, path);
            println!("Done.");
        }
    }

    Ok(())
}

/// Error chain on a single line; toml parse errors span several
fn one_line(err: &anyhow::Error) -> String {
    format!("{err:#}")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
