//! shaderblob configuration
//!
//! Settings are read from the first file found of:
//! - an explicit `--config` path
//! - `./shaderblob.toml` in the working directory
//! - `<config dir>/shaderblob/config.toml` (e.g. `~/.config` on Linux)
//!
//! Missing sections and fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use shaderblob_core::locator::DEFAULT_SDK_ROOT;
use shaderblob_core::naming::DEFAULT_PREFIX;
use shaderblob_core::pipeline::DEFAULT_OUTPUT;
use shaderblob_core::serializer::DEFAULT_BYTES_PER_LINE;
use shaderblob_core::{CollisionPolicy, CompilerLocator, PipelineOptions};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = "shaderblob.toml";
/// User configuration directory name
const CONFIG_DIR_NAME: &str = "shaderblob";
/// User configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Behavior when two shaders derive the same symbol name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnCollision {
    #[default]
    Overwrite,
    Error,
}

impl From<OnCollision> for CollisionPolicy {
    fn from(on: OnCollision) -> Self {
        match on {
            OnCollision::Overwrite => CollisionPolicy::Overwrite,
            OnCollision::Error => CollisionPolicy::Error,
        }
    }
}

/// Generated header settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Header to write, relative to the working directory
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Byte literals per line
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_bytes_per_line() -> usize {
    DEFAULT_BYTES_PER_LINE
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            bytes_per_line: default_bytes_per_line(),
        }
    }
}

/// Symbol naming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolsConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub on_collision: OnCollision,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            on_collision: OnCollision::default(),
        }
    }
}

/// Shader compiler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Explicit `glslc` path; skips platform lookup when set
    #[serde(default)]
    pub program: Option<PathBuf>,

    /// Vulkan SDK root scanned on Windows
    #[serde(default = "default_sdk_root")]
    pub sdk_root: PathBuf,

    /// Extra arguments passed before the shader path
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_sdk_root() -> PathBuf {
    PathBuf::from(DEFAULT_SDK_ROOT)
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: None,
            sdk_root: default_sdk_root(),
            args: Vec::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub symbols: SymbolsConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,
}

impl Config {
    /// Load configuration using the standard lookup order
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, Path::new("."), Self::user_config_path())
    }

    /// Lookup with the project directory and user file given explicitly
    pub fn load_with(
        explicit: Option<&Path>,
        project_dir: &Path,
        user_config: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let project_config = project_dir.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            return Self::load_from(&project_config);
        }

        if let Some(user_config) = user_config.filter(|p| p.is_file()) {
            return Self::load_from(&user_config);
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;
        config.validate()?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the user configuration directory (`<config dir>/shaderblob/`)
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the user configuration file path
    pub fn user_config_path() -> Option<PathBuf> {
        Self::user_config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }

    /// Reject settings that would produce a broken header
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.bytes_per_line == 0 {
            return Err(ConfigError::Invalid(
                "output.bytes_per_line must be at least 1".to_string(),
            ));
        }
        if self.symbols.prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "symbols.prefix must not be empty".to_string(),
            ));
        }
        if self.output.path.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "output.path {:?} does not name a file",
                self.output.path
            )));
        }
        Ok(())
    }

    /// Options for the batch driver
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            output: self.output.path.clone(),
            prefix: self.symbols.prefix.clone(),
            bytes_per_line: self.output.bytes_per_line,
            on_collision: self.symbols.on_collision.into(),
        }
    }

    /// Compiler lookup for the host platform
    pub fn locator(&self) -> CompilerLocator {
        CompilerLocator::new()
            .with_sdk_root(self.compiler.sdk_root.clone())
            .with_program(self.compiler.program.clone())
    }

    /// Commented default configuration file
    pub fn generate_default_config() -> String {
        format!(
            r#"# shaderblob configuration
# Place this file at ./{PROJECT_CONFIG_FILE} or <config dir>/{CONFIG_DIR_NAME}/{CONFIG_FILE_NAME}

[output]
# Generated header, relative to the working directory
path = "{DEFAULT_OUTPUT}"
# Byte literals per line in each array
bytes_per_line = {DEFAULT_BYTES_PER_LINE}

[symbols]
# Symbols are named <prefix><Stage><Name>, e.g. {DEFAULT_PREFIX}VertTex for shaders/tex.vert
prefix = "{DEFAULT_PREFIX}"
# Two shaders with the same symbol: "overwrite" keeps the later one, "error" aborts
on_collision = "overwrite"

[compiler]
# Explicit glslc executable (skips PATH and Vulkan SDK lookup)
# program = "/usr/bin/glslc"
# Vulkan SDK root scanned on Windows
sdk_root = "{DEFAULT_SDK_ROOT}"
# Extra arguments passed to glslc before the shader path
args = []
"#
        )
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {0:?}")]
    ReadError(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse {0:?}")]
    ParseError(PathBuf, #[source] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
