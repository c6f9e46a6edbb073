use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::AliasError;
use crate::follow::AliasResultSet;
use crate::util;

/// Runtime plugin that reads the `alias` field.
pub const PLUGIN_NAME: &str = "alias-quokka-plugin";

/// Default alias-output file name.
pub const DOCUMENT_NAME: &str = ".quokka";

/// A parsed `.quokka` document. Unknown fields are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct QuokkaDocument {
    fields: Map<String, Value>,
}

impl QuokkaDocument {
    /// `{"plugins": ["alias-quokka-plugin"], "alias": {}}`.
    pub fn skeleton() -> Self {
        let mut fields = Map::new();
        fields.insert(
            "plugins".to_string(),
            Value::Array(vec![Value::String(PLUGIN_NAME.to_string())]),
        );
        fields.insert("alias".to_string(), Value::Object(Map::new()));
        Self { fields }
    }

    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let content = std::fs::read_to_string(path).map_err(|e| AliasError::io(path, e))?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, AliasError> {
        let malformed = |message: String| AliasError::OutputMalformed {
            path: path.display().to_string(),
            message,
        };

        let value: Value = if content.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?
        };
        let Value::Object(mut fields) = value else {
            return Err(malformed("top level must be an object".to_string()));
        };

        match fields.get("alias") {
            None => {
                fields.insert("alias".to_string(), Value::Object(Map::new()));
            }
            Some(Value::Object(_)) => {}
            Some(_) => return Err(malformed("\"alias\" must be an object".to_string())),
        }
        if matches!(fields.get("plugins"), Some(v) if !v.is_array()) {
            return Err(malformed("\"plugins\" must be an array".to_string()));
        }

        Ok(Self { fields })
    }

    /// Current `alias` entries, in document order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .get("alias")
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(k, v)| Some((k.as_str(), v.as_str()?)))
    }

    pub fn plugins(&self) -> Vec<&str> {
        self.fields
            .get("plugins")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Union `discovered` into `alias`. New values win; nothing is removed.
    ///
    /// Also makes sure the alias plugin is listed, first, when it is missing.
    pub fn merge_aliases(&mut self, discovered: &AliasResultSet) {
        let alias = self
            .fields
            .entry("alias")
            .or_insert_with(|| Value::Object(Map::new()));
        if !alias.is_object() {
            *alias = Value::Object(Map::new());
        }
        if let Value::Object(map) = alias {
            for (specifier, target) in discovered {
                map.insert(specifier.clone(), Value::String(target.clone()));
            }
        }

        let plugins = self
            .fields
            .entry("plugins")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = plugins {
            if !items.iter().any(|p| p.as_str() == Some(PLUGIN_NAME)) {
                items.insert(0, Value::String(PLUGIN_NAME.to_string()));
            }
        }
    }

    /// Pretty JSON with 2-space indentation and a trailing newline.
    pub fn render(&self) -> Result<String, AliasError> {
        let mut out = serde_json::to_string_pretty(&self.fields)?;
        out.push('\n');
        Ok(out)
    }

    pub fn persist(&self, path: &Path) -> Result<(), AliasError> {
        let rendered = self.render()?;
        std::fs::write(path, rendered).map_err(|e| AliasError::io(path, e))
    }
}

/// Default document location: next to the tsconfig.json.
pub fn default_location(tsconfig_path: &Path) -> PathBuf {
    tsconfig_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(DOCUMENT_NAME)
}

/// Re-root substituted paths so they resolve from the document's directory.
///
/// `root` is the directory aliases were resolved against. When the document
/// sits in that directory the values are returned unchanged.
pub fn rebase(aliases: AliasResultSet, document_dir: &Path, root: &Path) -> AliasResultSet {
    let offset = util::relative_to(document_dir, root);
    if offset.as_os_str().is_empty() {
        return aliases;
    }
    aliases
        .into_iter()
        .map(|(specifier, target)| {
            let rebased = util::normalize(&offset.join(&target));
            let mut value = util::slash_path(&rebased);
            if !value.starts_with('.') && !value.starts_with('/') {
                value.insert_str(0, "./");
            }
            (specifier, value)
        })
        .collect()
}
