//! Symbol names derived from shader file names
//!
//! `shaders/foo.vert` becomes `<prefix>VertFoo`: the extension names the
//! shader stage and comes first, then the file stem. Both get their first
//! letter upper-cased and the rest is kept as-is.

use std::path::Path;

use crate::error::{BlobError, Result};

/// Prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "VK2D";

/// A shader file name split into stem and stage extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderName {
    /// File name without directory or extension (`foo`)
    pub base: String,
    /// Text after the last `.` (`vert`)
    pub stage: String,
}

impl ShaderName {
    /// Split a path like `shaders/foo.vert` into its base name and stage
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| BlobError::InvalidName {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let file = match path.rfind(['/', '\\']) {
            Some(separator) => &path[separator + 1..],
            None => path,
        };
        let period = file
            .rfind('.')
            .ok_or_else(|| invalid("missing '.' extension separator"))?;

        let base = &file[..period];
        let stage = &file[period + 1..];

        if base.is_empty() {
            return Err(invalid("empty base name"));
        }
        if stage.is_empty() {
            return Err(invalid("empty extension"));
        }
        if let Some(c) = base.chars().chain(stage.chars()).find(|c| !is_ident_char(*c)) {
            return Err(invalid(&format!("{c:?} is not allowed in a symbol name")));
        }

        Ok(Self {
            base: base.to_string(),
            stage: stage.to_string(),
        })
    }

    /// Build the symbol: prefix, then capitalized stage, then capitalized base
    pub fn symbol(&self, prefix: &str) -> String {
        format!("{prefix}{}{}", capitalize(&self.stage), capitalize(&self.base))
    }
}

/// Derives symbol names with a fixed, validated prefix
#[derive(Debug, Clone)]
pub struct SymbolNamer {
    prefix: String,
}

impl Default for SymbolNamer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl SymbolNamer {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let invalid = |reason: &str| BlobError::InvalidPrefix {
            prefix: prefix.clone(),
            reason: reason.to_string(),
        };

        match prefix.chars().next() {
            None => return Err(invalid("prefix is empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(invalid("must start with a letter or underscore"));
            }
            Some(_) => {}
        }
        if !prefix.chars().all(is_ident_char) {
            return Err(invalid("only letters, digits and underscores are allowed"));
        }

        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Derive the symbol name for a shader path
    pub fn derive(&self, path: &Path) -> Result<String> {
        let path_str = path.to_str().ok_or_else(|| BlobError::InvalidName {
            path: path.to_string_lossy().into_owned(),
            reason: "path is not valid UTF-8".to_string(),
        })?;
        Ok(ShaderName::parse(path_str)?.symbol(&self.prefix))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
