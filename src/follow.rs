use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::alias::AliasTable;
use crate::error::AliasError;
use crate::extract::SpecifierExtractor;
use crate::fs::SourceFs;
use crate::resolve;

/// Discovered aliases: original specifier -> substituted path.
pub type AliasResultSet = BTreeMap<String, String>;

/// Everything one traversal needs. Nothing is read from ambient state.
pub struct Traversal<'a> {
    pub table: &'a AliasTable,
    /// Directory substituted alias paths are resolved against.
    pub root: &'a Path,
    pub fs: &'a dyn SourceFs,
    pub extractor: &'a dyn SpecifierExtractor,
    /// Stop after this many files. `None` visits the whole reachable graph.
    pub max_files: Option<usize>,
}

/// Result of a traversal.
#[derive(Debug, Default)]
pub struct TraversalOutcome {
    pub aliases: AliasResultSet,
    /// Specifiers that matched an alias rule but named no file.
    pub unresolved: Vec<String>,
    pub visited: usize,
    /// Set when `max_files` cut the walk short.
    pub truncated: bool,
}

impl Traversal<'_> {
    /// Walk the import graph from `start`, collecting every alias it needs.
    ///
    /// Relative imports are followed but never recorded. Bare package
    /// imports are ignored. Each file is read at most once, so cyclic graphs
    /// terminate.
    pub fn run(&self, start: &Path) -> Result<TraversalOutcome, AliasError> {
        let mut outcome = TraversalOutcome::default();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut pending = vec![start.to_path_buf()];

        while let Some(file) = pending.pop() {
            let key = self.fs.canonicalize(&file);
            if visited.contains(&key) {
                continue;
            }
            if self.max_files.is_some_and(|max| visited.len() >= max) {
                tracing::warn!(
                    limit = visited.len(),
                    "file limit reached, {} queued file(s) not visited",
                    pending.len() + 1
                );
                outcome.truncated = true;
                break;
            }
            visited.insert(key);

            let next = self.visit(&file, &mut outcome)?;
            // Reversed so the first import is visited first.
            pending.extend(next.into_iter().rev());
        }

        outcome.visited = visited.len();
        Ok(outcome)
    }

    /// Read one file, record its aliases and return the files it leads to.
    fn visit(
        &self,
        file: &Path,
        outcome: &mut TraversalOutcome,
    ) -> Result<Vec<PathBuf>, AliasError> {
        let text = self
            .fs
            .read_to_string(file)
            .map_err(|e| AliasError::io(file, e))?;
        let specifiers = self.extractor.extract(&text);
        tracing::debug!(file = %file.display(), imports = specifiers.len(), "visiting");

        let mut next = Vec::new();
        for specifier in specifiers {
            if let Some((rule, substituted)) = self.table.matches(&specifier) {
                match resolve::resolve_substituted(self.fs, self.root, &substituted) {
                    Some(found) => {
                        tracing::debug!(
                            %specifier,
                            via = %rule.prefix,
                            target = %found.display(),
                            "alias resolved"
                        );
                        outcome.aliases.insert(specifier, substituted);
                        next.push(found);
                    }
                    None => {
                        tracing::debug!(%specifier, %substituted, "alias target not found");
                        if !outcome.unresolved.contains(&specifier) {
                            outcome.unresolved.push(specifier);
                        }
                    }
                }
            } else if resolve::is_relative(&specifier) {
                match resolve::resolve_relative(self.fs, file, &specifier) {
                    Some(found) => next.push(found),
                    None => tracing::debug!(%specifier, "relative import not found"),
                }
            }
        }

        Ok(next)
    }
}
