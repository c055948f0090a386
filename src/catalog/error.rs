use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("line {line}: invalid frequency '{value}'")]
    InvalidFrequency { line: usize, value: String },
    #[error("line {line}: malformed band '{text}'")]
    MalformedBand { line: usize, text: String },
    #[error("line {line}: band {min} - {max} MHz has min above max")]
    InvertedBand { line: usize, min: f64, max: f64 },
    #[error("line {line}: invalid grid locator '{locator}'")]
    InvalidLocator { line: usize, locator: String },
    #[error("station record starting at line {line} is not terminated")]
    UnterminatedRecord { line: usize },
}
