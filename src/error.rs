use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Malformed frequency record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Symbol 0x{byte:02X} at position {position} is outside the cipher alphabet A-Z")]
    InvalidSymbol { byte: u8, position: usize },

    #[error("Text must be at least 3 symbols long to score, got {0}")]
    TextTooShort(usize),
}

pub type CfResult<T> = Result<T, CipherForgeError>;
