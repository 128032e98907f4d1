//! shaderblob core - compile shaders and embed them in a C header
//!
//! This crate provides:
//! - `glslc` lookup per platform (`locator`)
//! - Symbol names derived from shader file names (`naming`)
//! - Compiler invocation behind the `ShaderCompiler` trait (`compiler`)
//! - Hex array serialization and header assembly (`serializer`, `header`)
//! - The batch driver that ties it together (`pipeline`)

pub mod compiler;
pub mod error;
pub mod header;
pub mod locator;
pub mod map;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod naming;
pub mod pipeline;
pub mod serializer;

pub use compiler::{CollisionPolicy, GlslcCompiler, ShaderCompiler, compile_shaders};
pub use error::{BlobError, Result};
pub use header::HeaderAssembler;
pub use locator::{CompilerLocator, Platform};
pub use map::{ShaderBlob, ShaderMap};
pub use naming::{ShaderName, SymbolNamer};
pub use pipeline::{Outcome, Pipeline, PipelineOptions, run_with_glslc};
pub use serializer::{hex_literal, serialize_blob};
