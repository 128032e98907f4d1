//! Ordered symbol name to compiled bytes mapping

/// One compiled shader, named by its derived symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Compiled shaders keyed by symbol name, in insertion order
///
/// Re-inserting an existing name replaces its bytes but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderMap {
    entries: Vec<ShaderBlob>,
}

impl ShaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the bytes it replaced
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Option<Vec<u8>> {
        let name = name.into();
        match self.entries.iter_mut().find(|blob| blob.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.bytes, bytes)),
            None => {
                self.entries.push(ShaderBlob { name, bytes });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|blob| blob.name == name)
            .map(|blob| blob.bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShaderBlob> {
        self.entries.iter()
    }

    /// Total number of compiled bytes across all entries
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|blob| blob.bytes.len()).sum()
    }
}
