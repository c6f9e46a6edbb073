/// Errors produced by quokka-alias while generating aliases.
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}: not a file")]
    NotAFile(String),

    #[error("no tsconfig.json found at or above {0}")]
    NoProjectConfig(String),

    #[error("{path}: invalid config: {message}")]
    ConfigParse { path: String, message: String },

    #[error("{0}: no compilerOptions.paths mapping")]
    NoPathMappings(String),

    #[error("{path}: malformed alias document: {message}")]
    OutputMalformed { path: String, message: String },

    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0} does not exist and was not created")]
    CreateDeclined(String),
}

impl AliasError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
