use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures: any of these aborts the run before an artifact is written
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("No commands found in the script")]
    NoCommands,

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid built-in pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_display() {
        assert_eq!(
            CompileError::NoCommands.to_string(),
            "No commands found in the script"
        );

        let err = CompileError::Read {
            path: PathBuf::from("plugin.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read plugin.js: missing");
    }
}
