//! Shader compilation
//!
//! The compiler is a trait so the pipeline can run against a fake in tests.
//! [`GlslcCompiler`] runs the real executable, writing into a fresh
//! temporary directory for every shader so one invocation can never read
//! another's output.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{BlobError, Result};
use crate::map::ShaderMap;
use crate::naming::SymbolNamer;

/// Name of the compiled file inside each scratch directory
const SCRATCH_OUTPUT: &str = "a.spv";

/// Turns one shader source file into a compiled binary
pub trait ShaderCompiler {
    fn compile(&mut self, shader: &Path) -> Result<Vec<u8>>;
}

impl<C: ShaderCompiler + ?Sized> ShaderCompiler for &mut C {
    fn compile(&mut self, shader: &Path) -> Result<Vec<u8>> {
        (**self).compile(shader)
    }
}

/// What to do when two inputs derive the same symbol name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The later input replaces the earlier one
    #[default]
    Overwrite,
    /// Abort the batch
    Error,
}

/// Runs an external `glslc` executable
#[derive(Debug, Clone)]
pub struct GlslcCompiler {
    program: PathBuf,
    args: Vec<String>,
}

impl GlslcCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments passed before the shader path
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ShaderCompiler for GlslcCompiler {
    fn compile(&mut self, shader: &Path) -> Result<Vec<u8>> {
        let scratch = tempfile::Builder::new()
            .prefix("shaderblob-")
            .tempdir()
            .map_err(|e| BlobError::io("create scratch directory in", std::env::temp_dir(), e))?;
        let output_path = scratch.path().join(SCRATCH_OUTPUT);

        log::debug!("{:?} {:?} -o {:?}", self.program, shader, output_path);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(shader)
            .arg("-o")
            .arg(&output_path)
            .output()
            .map_err(|source| BlobError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BlobError::Compile {
                path: shader.to_path_buf(),
                status: output.status,
                stderr: single_line(&output.stderr),
            });
        }

        let bytes = fs::read(&output_path)
            .map_err(|e| BlobError::io("read compiled output", &output_path, e))?;

        let scratch_path = scratch.path().to_path_buf();
        scratch
            .close()
            .map_err(|e| BlobError::io("remove", scratch_path, e))?;

        Ok(bytes)
    }
}

/// Fold compiler stderr into one line for diagnostics
fn single_line(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        "no diagnostics".to_string()
    } else {
        lines.join("; ")
    }
}

/// Compile every input in order and collect the results by symbol name
///
/// All names are derived (and collisions resolved) before the compiler runs
/// for the first time, so a malformed path fails the batch without any
/// compiler invocation.
pub fn compile_shaders<C: ShaderCompiler + ?Sized>(
    compiler: &mut C,
    namer: &SymbolNamer,
    inputs: &[PathBuf],
    policy: CollisionPolicy,
) -> Result<ShaderMap> {
    let mut named = Vec::with_capacity(inputs.len());
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();

    for input in inputs {
        let name = namer.derive(input)?;
        if let Some(first) = seen.insert(name.clone(), input) {
            match policy {
                CollisionPolicy::Error => {
                    return Err(BlobError::Collision {
                        name,
                        first: first.clone(),
                        second: input.clone(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    log::warn!(
                        "{} is derived from both {:?} and {:?}; keeping {:?}",
                        name,
                        first,
                        input,
                        input
                    );
                }
            }
        }
        named.push((name, input));
    }

    let mut map = ShaderMap::new();
    for (name, input) in named {
        log::info!("Compiling {:?} as {}", input, name);
        let bytes = compiler.compile(input)?;
        if bytes.is_empty() {
            return Err(BlobError::EmptyArtifact(input.clone()));
        }
        map.insert(name, bytes);
    }

    Ok(map)
}
