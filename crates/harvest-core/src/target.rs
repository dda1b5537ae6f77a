// File: crates/harvest-core/src/target.rs
// Summary: Output file checks done before any data is loaded or aggregated.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HarvestError, Result};

/// A validated output location. Parent directories exist once this is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderTarget {
    path: PathBuf,
}

impl RenderTarget {
    /// Check that `path` can receive a file: it is not a directory and its parent
    /// exists or can be created.
    pub fn prepare(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || path.is_dir() {
            return Err(HarvestError::MissingRenderTarget(path.to_path_buf()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                std::fs::create_dir_all(parent)
                    .map_err(|_| HarvestError::MissingRenderTarget(path.to_path_buf()))?;
                debug!(dir = %parent.display(), "created output directory");
            }
        }
        Ok(Self { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn write(&self, bytes: impl AsRef<[u8]>) -> Result<()> {
        std::fs::write(&self.path, bytes)
            .map_err(|source| HarvestError::Io { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_not_a_target() {
        let dir = tempfile::tempdir().unwrap();
        let err = RenderTarget::prepare(dir.path()).unwrap_err();
        assert!(matches!(err, HarvestError::MissingRenderTarget(_)));
    }

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/deeper/chart.svg");
        let target = RenderTarget::prepare(&out).unwrap();
        assert!(out.parent().unwrap().is_dir());
        target.write("<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "<svg/>");
    }

    #[test]
    fn parent_that_is_a_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let err = RenderTarget::prepare(file.join("chart.svg")).unwrap_err();
        assert!(matches!(err, HarvestError::MissingRenderTarget(_)));
    }
}
