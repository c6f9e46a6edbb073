use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::AliasError;

/// Ask on stderr whether to create `path`; reads one answer line from `input`.
pub fn confirm_create(path: &Path, input: &mut dyn BufRead) -> Result<bool, AliasError> {
    let mut stderr = std::io::stderr().lock();
    write!(stderr, "{} does not exist. Create it? [y/N] ", path.display())
        .and_then(|()| stderr.flush())
        .map_err(|e| AliasError::io(Path::new("<stderr>"), e))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| AliasError::io(Path::new("<stdin>"), e))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
