use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeowsError {
    #[error("Unsupported criterion: no extractor for {0}")]
    UnsupportedCriterion(String),
    #[error("Parse error: {message}")]
    Parse { message: String },
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Duplicate designation: {0}")]
    DuplicateDesignation(String),
    #[error("Close approach references unknown designation: {0}")]
    UnknownDesignation(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Unsupported output format: {0}")]
    OutputFormat(String),
}

pub type Result<T> = std::result::Result<T, NeowsError>;

impl NeowsError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }
}

// Helper conversions
impl From<std::io::Error> for NeowsError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<csv::Error> for NeowsError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() { Self::Io(e.to_string()) } else { Self::parse(format!("csv: {e}")) }
    }
}
impl From<serde_json::Error> for NeowsError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() { Self::Io(e.to_string()) } else { Self::parse(format!("json: {e}")) }
    }
}
impl From<config::ConfigError> for NeowsError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
