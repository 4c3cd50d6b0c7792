//! Resolution of configured paths against the configuration directory.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::config::BuildConfig;

/// Normalized locations derived from a [`BuildConfig`]. They are absolute
/// when the configuration directory they were resolved against is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub entry: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: PathBuf,
    pub templates: Vec<PathBuf>,
}

impl BuildConfig {
    /// Resolve every relative path against `config_dir`, the directory that
    /// holds the configuration file. Absolute paths are kept as written.
    /// A relative `config_dir` yields relative results; [`crate::LoadedConfig`]
    /// always carries an absolute one.
    ///
    /// # Example
    ///
    /// ```
    /// use bundlecfg_config::BuildConfig;
    /// use std::path::Path;
    ///
    /// let paths = BuildConfig::default().resolve_paths(Path::new("/work/app/www/node"));
    /// assert_eq!(paths.output_dir, Path::new("/work/app"));
    /// assert_eq!(paths.output_file, Path::new("/work/app/bundle.js"));
    /// ```
    pub fn resolve_paths(&self, config_dir: impl AsRef<Path>) -> ResolvedPaths {
        let base = config_dir.as_ref();
        let output_dir = resolve(base, &self.output.path);
        ResolvedPaths {
            entry: resolve(base, &self.entry),
            output_file: output_dir.join(&self.output.filename),
            output_dir,
            templates: self
                .html_templates()
                .map(|html| resolve(base, &html.template))
                .collect(),
        }
    }
}

pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    base.join(path).clean()
}
