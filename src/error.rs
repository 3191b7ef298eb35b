#[derive(Debug, thiserror::Error)]
pub enum PathQueryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("predicate call format error: {0}")]
    CallFormat(String),

    #[error("unrecognized segment: {0}")]
    UnrecognizedSegment(String),

    #[error("strategy construction error: {0}")]
    StrategyConstruction(String),

    #[error("path expression is empty")]
    EmptyExpression,

    #[error("path '{expression}' not found (segments: {segments:?})")]
    NotFound {
        expression: String,
        segments: Vec<String>,
    },

    #[error("resolution was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PathQueryError>;
