use thiserror::Error;

/// Errors surfaced by the dataset, builder and export layers. Everything
/// propagates synchronously to the caller; there is no retry layer.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// A record failed structural validation: coordinates out of range or
    /// a required field missing. The map build aborts before producing a
    /// partial structure.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The CSV target could not be written, or an input CSV could not be
    /// read or parsed.
    #[error("Export error: {0}")]
    ExportError(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
