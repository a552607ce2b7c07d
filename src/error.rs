use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while extracting images from one EPUB.
///
/// `Open`, `Read` and `Write` end the run for that file. `Parse` and
/// `MissingReference` are soft: the pipeline logs them and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to open archive {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to read entry {entry}: {source}")]
    Read {
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {document}: {message}")]
    Parse { document: String, message: String },

    #[error("failed to write {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("referenced entry {entry} is not in the archive")]
    MissingReference { entry: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    pub fn parse(document: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            document: document.into(),
            message: message.to_string(),
        }
    }

    pub fn write(target: impl Into<String>, source: impl Into<io::Error>) -> Self {
        Self::Write {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Pipeline stage that failed, for console reports.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Read { .. } => "read",
            Self::Parse { .. } => "parse",
            Self::Write { .. } => "write",
            Self::MissingReference { .. } => "resolve",
        }
    }
}
