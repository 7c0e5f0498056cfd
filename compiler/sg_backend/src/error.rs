use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source unit into a loaded native type.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend rejected the generated source.
    #[error("compilation of `{symbol}` failed:\n{diagnostics}")]
    Compilation { symbol: String, diagnostics: String },

    /// A generated name is already defined in the JIT namespace.
    #[error("symbol `{symbol}` is already defined")]
    DuplicateSymbol { symbol: String },

    #[error("no usable C++ toolchain: {0}")]
    Toolchain(String),

    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("artifact cache: {0}")]
    Artifact(String),
}

impl BackendError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
