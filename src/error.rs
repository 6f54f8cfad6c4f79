use miette::Diagnostic;
use thiserror::Error;

/// Main error type for manacard operations
#[derive(Error, Diagnostic, Debug)]
pub enum CardError {
    #[error("Unknown colour code: {code:?}")]
    #[diagnostic(
        code(manacard::color),
        help("Colour codes are R, G, U, B, W or C, optionally paired with '+' (e.g. U+R)")
    )]
    UnknownColorCode { code: String },

    #[error("Fetch failed for task {label}: {source}")]
    #[diagnostic(code(manacard::fetch))]
    Fetch {
        label: String,
        #[source]
        source: FetchError,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(manacard::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(manacard::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(manacard::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

/// Failure of a single document fetch against a card store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("could not decode document {document}: {message}")]
    Decode { document: String, message: String },

    #[error("timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, CardError>;
