//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - An isolated project directory with shader sources and config
//! - A shell-script stand-in for glslc
//! - A command builder for the shaderblob binary

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Fake glslc: copies the source to the `-o` path, fails on names containing "broken"
pub const FAKE_GLSLC: &str = r#"#!/bin/sh
src=""
out=""
while [ $# -gt 0 ]; do
    case "$1" in
        -o) out="$2"; shift 2 ;;
        *) src="$1"; shift ;;
    esac
done
case "$src" in
    *broken*) echo "$src:1: error: '' : syntax error" >&2; echo "1 error generated." >&2; exit 1 ;;
esac
cp "$src" "$out"
"#;

/// Test environment with an isolated project directory
pub struct TestEnvironment {
    /// Temporary directory holding the project
    pub temp_dir: TempDir,
    /// Project root the binary runs in
    pub root: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated project with an empty `VK2D/` output directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        fs::create_dir_all(root.join("VK2D")).expect("Failed to create VK2D directory");
        fs::create_dir_all(root.join("shaders")).expect("Failed to create shaders directory");

        Self { temp_dir, root }
    }

    /// Write a shader source relative to the project root
    pub fn write_shader(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create shader directory");
        }
        fs::write(&path, content).expect("Failed to write test shader");
        path
    }

    /// Write `shaderblob.toml` in the project root
    pub fn write_config(&self, content: &str) {
        fs::write(self.root.join("shaderblob.toml"), content).expect("Failed to write test config");
    }

    /// Install the fake glslc script and point the project config at it
    pub fn use_fake_glslc(&self) {
        let script = self.root.join("fake-glslc.sh");
        fs::write(&script, FAKE_GLSLC).expect("Failed to write fake glslc");
        // Run through sh so the script never needs the executable bit
        self.write_config(&format!(
            "[compiler]\nprogram = \"/bin/sh\"\nargs = [\"{}\"]\n",
            script.display()
        ));
    }

    /// Path of the default output header
    pub fn header_path(&self) -> PathBuf {
        self.root.join("VK2D").join("Blobs.h")
    }

    /// Read the generated header
    pub fn read_header(&self) -> String {
        fs::read_to_string(self.header_path()).expect("Header should have been written")
    }

    /// Build a command for the shaderblob binary running inside the project
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_shaderblob"));
        cmd.current_dir(&self.root)
            // Keep any real user config out of the test
            .env("HOME", &self.root)
            .env("XDG_CONFIG_HOME", self.root.join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary with the given arguments
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to run shaderblob")
    }

    /// All files below the project root, relative to it, sorted
    pub fn files(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.root, &self.root, &mut files);
        files.sort();
        files
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to list directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).expect("Path is under root");
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}

/// Symbol names declared in a generated header, in order
pub fn declared_symbols(header: &str) -> Vec<String> {
    header
        .lines()
        .filter_map(|line| line.strip_prefix("const char "))
        .filter_map(|rest| rest.split("[]").next())
        .map(str::to_string)
        .collect()
}

/// The byte values of one declaration, parsed back from its hex literals
pub fn declared_bytes(header: &str, symbol: &str) -> Option<Vec<u8>> {
    let start = header.find(&format!("const char {symbol}[] = {{"))?;
    let body = &header[start..];
    let open = body.find('{')?;
    let close = body.find("};")?;
    body[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|lit| !lit.is_empty())
        .map(|lit| u8::from_str_radix(lit.trim_start_matches("0x"), 16).ok())
        .collect()
}
