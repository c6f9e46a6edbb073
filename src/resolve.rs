mod probe;
mod tsconfig;

use std::path::{Path, PathBuf};

use crate::fs::SourceFs;

/// Path mappings read from the nearest tsconfig.json.
#[derive(Debug)]
pub struct ProjectConfig {
    pub tsconfig_path: PathBuf,
    /// Directory alias targets are relative to (`baseUrl`, default the tsconfig dir).
    pub base_dir: PathBuf,
    pub mappings: Vec<(String, Vec<String>)>,
}

pub(crate) use probe::probe;
pub(crate) use tsconfig::{find_tsconfig, load_project_config};

/// Resolve an alias-substituted path against the traversal root.
pub(crate) fn resolve_substituted(
    fs: &dyn SourceFs,
    root: &Path,
    substituted: &str,
) -> Option<PathBuf> {
    probe(fs, &crate::util::normalize(&root.join(substituted)))
}

/// Resolve a `./` or `../` specifier against the importing file's directory.
pub(crate) fn resolve_relative(
    fs: &dyn SourceFs,
    from_file: &Path,
    specifier: &str,
) -> Option<PathBuf> {
    let parent = from_file.parent()?;
    probe(fs, &crate::util::normalize(&parent.join(specifier)))
}

/// Whether a specifier is resolved relative to the importing file.
pub(crate) fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}
