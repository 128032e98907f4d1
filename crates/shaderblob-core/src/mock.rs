//! Fake shader compiler for testing
//!
//! Returns canned bytes per source path and records every call, so the
//! pipeline can be exercised without a Vulkan SDK installed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::compiler::ShaderCompiler;
use crate::error::{BlobError, Result};

/// A compiler that never spawns a process
#[derive(Debug, Default)]
pub struct FakeCompiler {
    outputs: HashMap<PathBuf, Vec<u8>>,
    failures: HashMap<PathBuf, String>,
    /// Every path passed to `compile`, in call order
    pub calls: Vec<PathBuf>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiling `path` returns `bytes`
    pub fn with_output(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.outputs.insert(path.into(), bytes.into());
        self
    }

    /// Compiling `path` fails with `message`
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn was_called_with(&self, path: impl AsRef<Path>) -> bool {
        self.calls.iter().any(|p| p == path.as_ref())
    }
}

impl ShaderCompiler for FakeCompiler {
    fn compile(&mut self, shader: &Path) -> Result<Vec<u8>> {
        self.calls.push(shader.to_path_buf());

        if let Some(message) = self.failures.get(shader) {
            return Err(BlobError::CompileRejected {
                path: shader.to_path_buf(),
                message: message.clone(),
            });
        }

        self.outputs
            .get(shader)
            .cloned()
            .ok_or_else(|| BlobError::CompileRejected {
                path: shader.to_path_buf(),
                message: "no canned output".to_string(),
            })
    }
}
