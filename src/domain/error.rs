use std::io;

use thiserror::Error;

/// Library-wide error type for sitecat operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Site kind selector does not name a supported site.
    #[error("Invalid site '{name}': must be one of {available}")]
    InvalidSiteKind { name: String, available: String },

    /// A parameter the chosen site requires was not supplied.
    #[error("Site '{site}' requires {parameter}")]
    MissingParameter { site: String, parameter: String },

    /// A parameter was supplied for a site that does not accept it.
    #[error("Site '{site}' does not accept {parameter}")]
    ForbiddenParameter { site: String, parameter: String },

    /// Generic validation failure.
    #[error("{0}")]
    Validation(String),

    /// Defaults file is malformed or inconsistent.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Catalog could not be rendered.
    #[error("Failed to render site catalog: {0}")]
    Serialization(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Interactive prompt was aborted or failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    pub fn missing<S: Into<String>, P: Into<String>>(site: S, parameter: P) -> Self {
        AppError::MissingParameter { site: site.into(), parameter: parameter.into() }
    }

    pub fn forbidden<S: Into<String>, P: Into<String>>(site: S, parameter: P) -> Self {
        AppError::ForbiddenParameter { site: site.into(), parameter: parameter.into() }
    }

    pub fn parse<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind` view for callers that branch on error class.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidSiteKind { .. }
            | AppError::MissingParameter { .. }
            | AppError::ForbiddenParameter { .. }
            | AppError::Validation(_)
            | AppError::InvalidConfig(_) => io::ErrorKind::InvalidInput,
            AppError::ParseError { .. }
            | AppError::Serialization(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidData,
            AppError::Prompt(_) => io::ErrorKind::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_message_names_site_and_parameter() {
        let err = AppError::missing("slurm", "a queue name");
        assert_eq!(err.to_string(), "Site 'slurm' requires a queue name");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn io_error_keeps_its_kind() {
        let err = AppError::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
