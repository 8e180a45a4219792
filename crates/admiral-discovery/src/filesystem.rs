//! Filesystem model discovery
//!
//! Every source file under a model root names one model:
//! `<root>/blog/post.rb` -> `Blog::Post`. Files under the reserved
//! `concerns/` namespace are skipped. The scan runs once and is memoized
//! until [`ModelDiscovery::reset`] is called.

use crate::RESERVED_NAMESPACE;
use admiral_core::types::ModelDiscovery;
use admiral_core::utils::camelize_path;
use admiral_core::Result;
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Source file extensions scanned when none are configured
const DEFAULT_EXTENSIONS: &[&str] = &["rb", "rs"];

/// Model discovery over one or more model source roots
#[derive(Debug)]
pub struct FsModelDiscovery {
    roots: Vec<Utf8PathBuf>,
    extensions: Vec<String>,
    cache: RwLock<Option<Vec<String>>>,
}

impl FsModelDiscovery {
    /// Discovery over the given roots
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            cache: RwLock::new(None),
        }
    }

    /// Restrict the scan to files with these extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Model source roots
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    /// Whether a scan result is currently memoized
    pub fn is_cached(&self) -> bool {
        self.cache.read().is_some()
    }

    fn scan(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                debug!("Skipping non-existent model root: {}", root);
                continue;
            }

            let walker = WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

            for entry in walker {
                let entry = entry?;
                if !entry.file_type().is_file() || !self.has_model_extension(entry.path()) {
                    continue;
                }

                let Some(relative) = relative_utf8(entry.path(), root) else {
                    warn!("Skipping model file with non UTF-8 path: {:?}", entry.path());
                    continue;
                };

                let name = camelize_path(relative.as_str());
                if name.is_empty() || name.starts_with(RESERVED_NAMESPACE) {
                    continue;
                }
                names.push(name);
            }
        }

        debug!("Discovered {} model files in {} roots", names.len(), self.roots.len());
        Ok(names)
    }

    fn has_model_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl ModelDiscovery for FsModelDiscovery {
    fn discover_model_names(&self) -> Result<Vec<String>> {
        if let Some(names) = self.cache.read().as_ref() {
            return Ok(names.clone());
        }

        let names = self.scan()?;
        *self.cache.write() = Some(names.clone());
        Ok(names)
    }

    fn reset(&self) {
        if self.cache.write().take().is_some() {
            debug!("Cleared memoized model discovery");
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn relative_utf8<'a>(path: &'a Path, root: &Utf8Path) -> Option<&'a Utf8Path> {
    let relative = path.strip_prefix(root.as_std_path()).ok()?;
    Utf8Path::from_path(relative)
}
