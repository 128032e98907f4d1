//! Generated header assembly

use crate::map::ShaderMap;
use crate::serializer::{DEFAULT_BYTES_PER_LINE, serialize_blob};

/// File name used in the preamble when the output path has none
pub const DEFAULT_HEADER_NAME: &str = "Blobs.h";

/// Builds the generated C header from compiled shaders
#[derive(Debug, Clone)]
pub struct HeaderAssembler {
    file_name: String,
    bytes_per_line: usize,
}

impl Default for HeaderAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_NAME)
    }
}

impl HeaderAssembler {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
        }
    }

    pub fn with_bytes_per_line(mut self, bytes_per_line: usize) -> Self {
        self.bytes_per_line = bytes_per_line;
        self
    }

    /// Doc-comment block and include guard emitted once at the top
    pub fn preamble(&self) -> String {
        format!(
            "/// \\file {}\n\
             /// \\author shaderblob\n\
             /// \\brief Shader binary blobs\n\
             #pragma once\n\n",
            self.file_name
        )
    }

    /// Render the whole document, one `const char` array per entry
    pub fn assemble(&self, shaders: &ShaderMap) -> String {
        let mut doc = self.preamble();

        for blob in shaders.iter() {
            doc.push_str("const char ");
            doc.push_str(&blob.name);
            doc.push_str("[] = {");
            doc.push_str(&serialize_blob(&blob.bytes, self.bytes_per_line));
            doc.push_str("\n};\n\n");
        }

        // Drop the blank line after the last block; the preamble guarantees it exists
        doc.truncate(doc.len() - 2);
        doc
    }
}
