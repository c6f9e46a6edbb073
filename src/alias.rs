/// One `compilerOptions.paths` entry reduced to a prefix substitution.
///
/// `@/*: ["src/*", "lib/*"]` becomes `prefix = "@/"`, `target_prefix = "src/"`.
/// Only the first candidate is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    pub prefix: String,
    pub target_prefix: String,
}

/// Ordered alias rules, tried first to last.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    /// Build the table from `(pattern, candidates)` pairs in declaration order.
    pub fn build<P, C, S>(mappings: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<str>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = mappings
            .into_iter()
            .filter_map(|(pattern, candidates)| {
                let first = candidates.into_iter().next()?;
                Some(AliasRule {
                    prefix: strip_wildcard(pattern.as_ref()).to_string(),
                    target_prefix: strip_wildcard(first.as_ref()).to_string(),
                })
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose prefix starts `specifier`, with the substituted path.
    ///
    /// First declared wins, even when a later rule has a longer prefix.
    pub fn matches(&self, specifier: &str) -> Option<(&AliasRule, String)> {
        self.rules.iter().find_map(|rule| {
            let rest = specifier.strip_prefix(rule.prefix.as_str())?;
            Some((rule, format!("{}{rest}", rule.target_prefix)))
        })
    }
}

/// `@/*` -> `@/`. Only a trailing `/*` wildcard is dropped, and its slash stays.
fn strip_wildcard(s: &str) -> &str {
    if s.ends_with("/*") {
        &s[..s.len() - 1]
    } else {
        s
    }
}
