//! Shader compiler lookup
//!
//! On Unix `glslc` is expected on `PATH`. Elsewhere the Vulkan SDK root is
//! scanned for versioned installations and the last one listed wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BlobError, Result};

/// Command name used when the compiler is resolved through `PATH`
pub const GLSLC_COMMAND: &str = "glslc";
/// Default Vulkan SDK installation root on Windows
pub const DEFAULT_SDK_ROOT: &str = "C:/VulkanSDK";

const SDK_BIN_DIR: &str = "Bin";
const SDK_GLSLC: &str = "glslc.exe";

/// Lookup strategy for the compiler executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Bare command name, resolved through `PATH`
    Unix,
    /// Scan the SDK root for an installation
    Windows,
}

impl Platform {
    /// The strategy matching the platform we were built for
    pub fn host() -> Self {
        if cfg!(unix) {
            Platform::Unix
        } else {
            Platform::Windows
        }
    }
}

/// Resolves the path to the `glslc` executable
#[derive(Debug, Clone)]
pub struct CompilerLocator {
    platform: Platform,
    sdk_root: PathBuf,
    program: Option<PathBuf>,
}

impl Default for CompilerLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerLocator {
    pub fn new() -> Self {
        Self {
            platform: Platform::host(),
            sdk_root: PathBuf::from(DEFAULT_SDK_ROOT),
            program: None,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_sdk_root(mut self, sdk_root: impl Into<PathBuf>) -> Self {
        self.sdk_root = sdk_root.into();
        self
    }

    /// Use an explicit executable and skip platform lookup
    pub fn with_program(mut self, program: Option<PathBuf>) -> Self {
        self.program = program;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Find the compiler executable
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(program) = &self.program {
            log::debug!("Using configured shader compiler {:?}", program);
            return Ok(program.clone());
        }

        match self.platform {
            Platform::Unix => Ok(PathBuf::from(GLSLC_COMMAND)),
            Platform::Windows => find_in_sdk_root(&self.sdk_root),
        }
    }
}

fn find_in_sdk_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(BlobError::SdkRootMissing(root.to_path_buf()));
    }

    let entries = fs::read_dir(root).map_err(|e| BlobError::io("list", root, e))?;

    // No version comparison: the last directory the listing yields is used
    let mut sdk = None;
    for entry in entries {
        let entry = entry.map_err(|e| BlobError::io("list", root, e))?;
        if entry.path().is_dir() {
            sdk = Some(entry.file_name());
        }
    }

    let sdk = sdk.ok_or_else(|| BlobError::NoSdkInstalled(root.to_path_buf()))?;
    let glslc = root.join(sdk).join(SDK_BIN_DIR).join(SDK_GLSLC);
    log::info!("Found glslc at {:?}", glslc);
    Ok(glslc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unix_uses_bare_command() {
        let locator = CompilerLocator::new().with_platform(Platform::Unix);
        assert_eq!(locator.locate().unwrap(), PathBuf::from("glslc"));
    }

    #[test]
    fn explicit_program_wins() {
        let locator = CompilerLocator::new()
            .with_platform(Platform::Windows)
            .with_sdk_root("/definitely/not/here")
            .with_program(Some(PathBuf::from("/opt/vulkan/bin/glslc")));
        assert_eq!(
            locator.locate().unwrap(),
            PathBuf::from("/opt/vulkan/bin/glslc")
        );
    }

    #[test]
    fn windows_picks_sdk_directory() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("1.3.250.0")).unwrap();
        fs::write(root.path().join("README.txt"), "not an sdk").unwrap();

        let locator = CompilerLocator::new()
            .with_platform(Platform::Windows)
            .with_sdk_root(root.path());
        let glslc = locator.locate().unwrap();

        assert_eq!(
            glslc,
            root.path().join("1.3.250.0").join("Bin").join("glslc.exe")
        );
    }

    #[test]
    fn windows_uses_last_listed_sdk_of_several() {
        let root = TempDir::new().unwrap();
        for version in ["1.3.236.0", "1.3.250.0", "1.2.198.1"] {
            fs::create_dir(root.path().join(version)).unwrap();
        }
        fs::write(root.path().join("zz-notes.txt"), "").unwrap();

        let last_dir = fs::read_dir(root.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_dir())
            .last()
            .unwrap();

        let glslc = CompilerLocator::new()
            .with_platform(Platform::Windows)
            .with_sdk_root(root.path())
            .locate()
            .unwrap();

        assert_eq!(glslc, last_dir.join("Bin").join("glslc.exe"));
    }

    #[test]
    fn windows_missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("VulkanSDK");

        let err = CompilerLocator::new()
            .with_platform(Platform::Windows)
            .with_sdk_root(&missing)
            .locate()
            .unwrap_err();
        assert!(matches!(err, BlobError::SdkRootMissing(p) if p == missing));
    }

    #[test]
    fn windows_empty_root_is_an_error() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("stray-file"), "").unwrap();

        let err = CompilerLocator::new()
            .with_platform(Platform::Windows)
            .with_sdk_root(root.path())
            .locate()
            .unwrap_err();
        assert!(matches!(err, BlobError::NoSdkInstalled(_)));
    }
}
