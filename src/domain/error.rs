//! Domain error types.

/// Top-level error type for etfscan.
#[derive(Debug, thiserror::Error)]
pub enum EtfscanError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("insufficient history for {code}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        code: String,
        bars: usize,
        minimum: usize,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no usable results across all instruments")]
    NoResults,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EtfscanError> for std::process::ExitCode {
    fn from(err: &EtfscanError) -> Self {
        let code: u8 = match err {
            EtfscanError::Io(_) => 1,
            EtfscanError::ConfigParse { .. }
            | EtfscanError::ConfigMissing { .. }
            | EtfscanError::ConfigInvalid { .. } => 2,
            EtfscanError::DataSource { .. } => 3,
            EtfscanError::NoData { .. }
            | EtfscanError::InsufficientHistory { .. }
            | EtfscanError::NoResults => 5,
        };
        std::process::ExitCode::from(code)
    }
}
