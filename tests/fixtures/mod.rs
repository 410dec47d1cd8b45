//! Shared fixtures for the integration tests
//!
//! - Static importcfg files under `tests/fixtures/importcfg`
//! - A scratch GOROOT/GOPATH tree built in a temp dir

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pkgload_importcfg::MAGIC;
use tempfile::TempDir;

/// Path to a static importcfg fixture
pub fn importcfg_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/importcfg")
        .join(name)
}

/// Write `body` behind the magic header and return the file path.
pub fn write_importcfg(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut data = MAGIC.to_vec();
    data.extend_from_slice(body.as_bytes());
    fs::write(&path, data).unwrap();
    path
}

/// Scratch source tree:
///
/// ```text
/// goroot/src/fmt
/// gopath1/src/example.com/app
/// gopath1/src/example.com/lib
/// gopath2/src/example.com/lib        (shadowed by gopath1)
/// gopath2/src/example.com/extra
/// forks/lib                          (only reachable through importcfg)
/// ```
pub struct SourceTree {
    pub root: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in [
            "goroot/src/fmt",
            "gopath1/src/example.com/app",
            "gopath1/src/example.com/lib",
            "gopath2/src/example.com/lib",
            "gopath2/src/example.com/extra",
            "forks/lib",
        ] {
            fs::create_dir_all(root.path().join(dir)).unwrap();
        }
        Self { root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    pub fn goroot(&self) -> PathBuf {
        self.path("goroot")
    }

    pub fn gopath(&self) -> Vec<PathBuf> {
        vec![self.path("gopath1"), self.path("gopath2")]
    }

    pub fn path_str(&self, rel: &str) -> String {
        self.path(rel).to_str().unwrap().to_string()
    }
}
