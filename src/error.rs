use std::path::PathBuf;

use thiserror::Error;

/// Which side of the pipeline an I/O failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    OpenInput,
    Read,
    CreateOutput,
    Write,
    Flush,
}

impl std::fmt::Display for IoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IoOp::OpenInput => "open input",
            IoOp::Read => "read input",
            IoOp::CreateOutput => "create output",
            IoOp::Write => "write output",
            IoOp::Flush => "flush output",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no input file specified")]
    Usage,
    #[error("input file does not exist: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config error: {0:#}")]
    Config(#[from] anyhow::Error),
}

impl ExtractError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Usage => 2,
            ExtractError::InputNotFound { .. } => 3,
            ExtractError::Io { .. } | ExtractError::Config(_) => 1,
        }
    }
}
