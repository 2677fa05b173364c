// Law-checking error types
// Every failure a law run can report: a violated law, bad configuration,
// unreadable files and report serialization.

use thiserror::Error;

/// Numeric codes for law-checking errors
pub mod codes {
    // Law-checking error codes start with 7000
    pub const VIOLATION: u32 = 7001;
    pub const CONFIG: u32 = 7002;
    pub const IO: u32 = 7003;
    pub const REPORT: u32 = 7004;
    pub const LOGGING: u32 = 7005;
}

/// Errors raised while checking laws
#[derive(Error, Debug)]
pub enum LawError {
    /// A sampled input broke a law
    #[error("Law violated: {law} ({detail})")]
    Violation { law: String, detail: String },

    /// The configuration could not be parsed
    #[error("Invalid law configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized
    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl LawError {
    pub fn violation(law: impl Into<String>, detail: impl Into<String>) -> Self {
        LawError::Violation { law: law.into(), detail: detail.into() }
    }

    pub fn code(&self) -> u32 {
        match self {
            LawError::Violation { .. } => codes::VIOLATION,
            LawError::Config(_) => codes::CONFIG,
            LawError::Io(_) => codes::IO,
            LawError::Report(_) => codes::REPORT,
            LawError::Logging(_) => codes::LOGGING,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, LawError::Violation { .. })
    }
}

/// Result type for law checks
pub type LawResult<T> = Result<T, LawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_and_code() {
        let err = LawError::violation("Option: right identity", "sample 3");
        assert_eq!(err.to_string(), "Law violated: Option: right identity (sample 3)");
        assert_eq!(err.code(), codes::VIOLATION);
        assert!(err.is_violation());
    }

    #[test]
    fn test_toml_error_converts() {
        let parsed: Result<toml::Value, _> = toml::from_str("samples = ");
        let err: LawError = parsed.unwrap_err().into();
        assert_eq!(err.code(), codes::CONFIG);
    }
}
