//! Error types for the blob pipeline
//!
//! Every failure is fatal to the batch. Each variant carries the path that
//! caused it so the binary can print a single-line diagnostic.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlobError>;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Vulkan SDK root {0:?} does not exist")]
    SdkRootMissing(PathBuf),

    #[error("No Vulkan SDK installation found under {0:?}")]
    NoSdkInstalled(PathBuf),

    #[error("Invalid shader path {path:?}: {reason}")]
    InvalidName { path: String, reason: String },

    #[error("Invalid symbol prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("Symbol {name} is derived from both {first:?} and {second:?}")]
    Collision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to start shader compiler {program:?}")]
    CompilerSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiling {path:?} failed ({status}): {stderr}")]
    Compile {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Compiler produced no output for {0:?}")]
    EmptyArtifact(PathBuf),

    /// Used by fake compilers that have no process exit status to report
    #[error("Compiling {path:?} failed: {message}")]
    CompileRejected { path: PathBuf, message: String },

    #[error("Failed to {op} {path:?}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BlobError {
    /// Wrap an I/O error with the operation and path it happened on
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BlobError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
