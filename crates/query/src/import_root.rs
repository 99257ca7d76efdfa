//! The database's trusted import directory.

use crate::error::{ImportError, Result};
use std::path::{Component, Path, PathBuf};

/// Neo4j import directory plus the sub-directory used for staging.
///
/// `LOAD CSV` can only read files below `base_path`, and refers to them by
/// their path relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRoot {
    base_path: PathBuf,
    sub_path: PathBuf,
    import_dir: PathBuf,
}

impl ImportRoot {
    /// `base_path` must be absolute; `sub_path` must be relative and stay
    /// inside `base_path`. An empty `sub_path` stages directly in the base.
    pub fn new(base_path: impl AsRef<Path>, sub_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref();
        let sub_path = sub_path.as_ref();

        if !base_path.is_absolute() {
            return Err(ImportError::InvalidImportRoot(format!(
                "base path {} must be absolute",
                base_path.display()
            )));
        }
        let base_path = normalize(base_path).ok_or_else(|| {
            ImportError::InvalidImportRoot(format!("cannot normalize {}", base_path.display()))
        })?;

        let sub_path = match normalize(sub_path) {
            Some(p) if !p.has_root() => p,
            _ => {
                return Err(ImportError::InvalidImportRoot(format!(
                    "sub path {} must be relative and stay inside the base path",
                    sub_path.display()
                )))
            }
        };

        let import_dir = if sub_path.as_os_str().is_empty() {
            base_path.clone()
        } else {
            base_path.join(&sub_path)
        };
        Ok(Self {
            base_path,
            sub_path,
            import_dir,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn sub_path(&self) -> &Path {
        &self.sub_path
    }

    /// `base_path/sub_path`, where staged files are written.
    pub fn import_dir(&self) -> &Path {
        &self.import_dir
    }

    /// Path of `file` relative to the base, `/`-separated, for use in a
    /// `file:///` URL.
    ///
    /// Relative inputs are resolved against the current directory. The result
    /// must name a strict descendant of the base; anything else is
    /// [`ImportError::PathOutsideImportRoot`].
    pub fn relative_url_path(&self, file: &Path) -> Result<String> {
        let outside = || ImportError::PathOutsideImportRoot {
            path: file.to_path_buf(),
            root: self.base_path.clone(),
        };

        let absolute = std::path::absolute(file).map_err(|_| outside())?;
        let normalized = normalize(&absolute).ok_or_else(outside)?;
        let relative = normalized
            .strip_prefix(&self.base_path)
            .map_err(|_| outside())?;

        let parts = relative
            .components()
            .map(|c| match c {
                Component::Normal(part) => Ok(part.to_string_lossy().into_owned()),
                _ => Err(outside()),
            })
            .collect::<Result<Vec<String>>>()?;
        if parts.is_empty() {
            return Err(outside());
        }

        Ok(parts.join("/"))
    }
}

/// Resolve `.` and `..` lexically. Returns `None` when `..` climbs above the
/// start of the path.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }
    Some(out)
}
