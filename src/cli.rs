//! Command-line interface for shaderblob.

use clap::Parser;
use shaderblob_config::{Config, OnCollision};
use std::path::PathBuf;

/// shaderblob - compile shaders with glslc and embed them in a C header
#[derive(Parser, Debug)]
#[command(name = "shaderblob")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shader sources to compile; the extension names the stage (tex.vert, tex.frag)
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Header to write (overrides config)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Prefix for generated symbol names (overrides config)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// glslc executable to use instead of looking it up
    #[arg(long, value_name = "PATH")]
    pub glslc: Option<PathBuf>,

    /// Configuration file (default: ./shaderblob.toml, then the user config)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when two shaders derive the same symbol name
    #[arg(long, value_enum, value_name = "MODE")]
    pub on_collision: Option<CollisionArg>,

    /// Set log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Print a commented default configuration and exit
    #[arg(long)]
    pub print_default_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.symbols.prefix = prefix.clone();
        }
        if let Some(glslc) = &self.glslc {
            config.compiler.program = Some(glslc.clone());
        }
        if let Some(on_collision) = self.on_collision {
            config.symbols.on_collision = on_collision.into();
        }
    }
}

/// Collision policy argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CollisionArg {
    Overwrite,
    Error,
}

impl From<CollisionArg> for OnCollision {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => OnCollision::Overwrite,
            CollisionArg::Error => OnCollision::Error,
        }
    }
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}
