//! Batch driver: inputs in, one generated header out
//!
//! Nothing is written until every shader has compiled. The header is written
//! to a temporary file beside the destination and renamed over it, so a
//! failed run leaves any previous header untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::compiler::{CollisionPolicy, GlslcCompiler, ShaderCompiler, compile_shaders};
use crate::error::{BlobError, Result};
use crate::header::{DEFAULT_HEADER_NAME, HeaderAssembler};
use crate::locator::CompilerLocator;
use crate::naming::{DEFAULT_PREFIX, SymbolNamer};
use crate::serializer::DEFAULT_BYTES_PER_LINE;

/// Destination used when none is configured
pub const DEFAULT_OUTPUT: &str = "VK2D/Blobs.h";

/// Settings for one run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output: PathBuf,
    pub prefix: String,
    pub bytes_per_line: usize,
    pub on_collision: CollisionPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            prefix: DEFAULT_PREFIX.to_string(),
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            on_collision: CollisionPolicy::default(),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No inputs were given; nothing was compiled or written
    NoInput,
    /// The header was written
    Written {
        path: PathBuf,
        shaders: usize,
        bytes: usize,
    },
}

/// Compiles shaders and writes the generated header
pub struct Pipeline<C> {
    compiler: C,
    options: PipelineOptions,
}

impl<C: ShaderCompiler> Pipeline<C> {
    pub fn new(compiler: C, options: PipelineOptions) -> Self {
        Self { compiler, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Run the whole batch
    pub fn run(&mut self, inputs: &[PathBuf]) -> Result<Outcome> {
        if inputs.is_empty() {
            return Ok(Outcome::NoInput);
        }

        let namer = SymbolNamer::new(self.options.prefix.as_str())?;
        let shaders = compile_shaders(
            &mut self.compiler,
            &namer,
            inputs,
            self.options.on_collision,
        )?;

        let file_name = self
            .options
            .output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string());
        let document = HeaderAssembler::new(file_name)
            .with_bytes_per_line(self.options.bytes_per_line)
            .assemble(&shaders);

        write_document(&self.options.output, &document)?;
        log::info!(
            "Wrote {} shader(s), {} bytes, to {:?}",
            shaders.len(),
            shaders.total_bytes(),
            self.options.output
        );

        Ok(Outcome::Written {
            path: self.options.output.clone(),
            shaders: shaders.len(),
            bytes: shaders.total_bytes(),
        })
    }
}

/// Locate `glslc` and run the batch with it
///
/// The compiler is only looked up when there is something to compile.
pub fn run_with_glslc(
    inputs: &[PathBuf],
    locator: &CompilerLocator,
    compiler_args: Vec<String>,
    options: PipelineOptions,
) -> Result<Outcome> {
    if inputs.is_empty() {
        return Ok(Outcome::NoInput);
    }

    let program = locator.locate()?;
    log::info!("Using shader compiler {:?}", program);
    let compiler = GlslcCompiler::new(program).with_args(compiler_args);
    Pipeline::new(compiler, options).run(inputs)
}

/// Mode for a header written where none existed, before the umask applies
#[cfg(unix)]
const NEW_HEADER_MODE: u32 = 0o644;

fn write_document(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let previous = fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".shaderblob-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if previous.is_none() {
            builder.permissions(fs::Permissions::from_mode(NEW_HEADER_MODE));
        }
    }

    let mut staged = builder
        .tempfile_in(dir)
        .map_err(|e| BlobError::io("create temporary file in", dir, e))?;
    staged
        .write_all(contents.as_bytes())
        .map_err(|e| BlobError::io("write", staged.path().to_path_buf(), e))?;

    // The renamed file takes the staged file's mode; keep the old header's
    if let Some(permissions) = previous {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| BlobError::io("set permissions on", staged.path().to_path_buf(), e))?;
    }

    staged
        .persist(path)
        .map_err(|e| BlobError::io("replace", path, e.error))?;

    Ok(())
}
