//! Expand input arguments that may be literal paths or glob patterns

use std::path::PathBuf;

use crate::{CliError, CliResult};

/// Resolve every input argument to concrete files, in stable order.
/// A pattern that matches nothing is an error rather than silence.
pub fn resolve_patterns(patterns: &[String]) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let literal = PathBuf::from(pattern);
        if literal.is_file() {
            files.push(literal);
            continue;
        }
        let mut matched = false;
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
                matched = true;
            }
        }
        if !matched {
            return Err(CliError::Other(format!("no files match '{pattern}'")));
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
