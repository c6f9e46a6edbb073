use std::path::{Path, PathBuf};

use crate::fs::SourceFs;

/// Extensions tried after each suffix, in order.
pub(crate) const EXTENSIONS: &[&str] = &["ts", "js"];

/// Suffixes tried before the extension: the path itself, then its index file.
const SUFFIXES: &[&str] = &["", "/index"];

/// Find the file an extensionless module path refers to.
///
/// Order: `base.ts`, `base.js`, `base/index.ts`, `base/index.js`. A base that
/// already names an existing `.ts`/`.js` file is accepted first.
pub(crate) fn probe(fs: &dyn SourceFs, base: &Path) -> Option<PathBuf> {
    if let Some(ext) = base.extension().and_then(|e| e.to_str()) {
        if EXTENSIONS.contains(&ext) && fs.is_file(base) {
            return Some(base.to_path_buf());
        }
    }

    let base = base.to_string_lossy();
    let base = base.trim_end_matches('/');
    for suffix in SUFFIXES {
        for ext in EXTENSIONS {
            let candidate = PathBuf::from(format!("{base}{suffix}.{ext}"));
            if fs.is_file(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}
