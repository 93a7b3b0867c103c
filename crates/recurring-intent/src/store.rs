//! Destinations for generated artifacts.
//!
//! Paths handed to a store are relative and `/`-separated, e.g. `contracts/Foo.sol`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;

pub trait ArtifactStore: Send + Sync {
    /// Write `content` at `path`, replacing any previous artifact there.
    fn write_artifact(&self, path: &str, content: &str) -> Result<()>;
}

impl<T: ArtifactStore + ?Sized> ArtifactStore for &T {
    fn write_artifact(&self, path: &str, content: &str) -> Result<()> {
        (**self).write_artifact(path, content)
    }
}

/// Writes artifacts below a root directory. Each file is written to a `.tmp` sibling
/// and renamed into place.
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() {
            bail!("artifact path is empty");
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => bail!("artifact path {path:?} must stay inside the output directory"),
            }
        }
        Ok(self.root.join(relative))
    }
}

impl ArtifactStore for FsArtifactStore {
    fn write_artifact(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path)?;
        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }

        let tmp_path = tmp_path_for(&target);
        fs::write(&tmp_path, content.as_bytes())
            .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &target).with_context(|| format!("failed replacing {}", target.display()))?;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Keeps artifacts in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, path: &str) -> Option<String> {
        self.files.lock().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.lock().keys().cloned().collect()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn write_artifact(&self, path: &str, content: &str) -> Result<()> {
        self.files.lock().insert(path.to_string(), content.to_string());
        Ok(())
    }
}
