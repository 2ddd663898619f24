//! Error types for the comparison engine.

use thiserror::Error;

/// Errors that can occur while driving a comparison session.
#[derive(Error, Debug)]
pub enum CompareError {
    /// `load` was called while rays are already loaded.
    #[error("shotline data already loaded; clear the session first")]
    AlreadyLoaded,

    /// `run` was called with no rays loaded.
    #[error("no shotline data loaded")]
    NothingLoaded,

    /// `report` was called before a completed `run`.
    #[error("no comparison results; run the comparison first")]
    NotCompared,

    /// A settings operation named a setting that does not exist.
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),

    /// A settings write carried a value the setting cannot parse.
    #[error("invalid value `{value}` for setting `{name}`")]
    InvalidSettingValue {
        /// Setting name.
        name: String,
        /// Offending value text.
        value: String,
    },

    /// A tolerance was configured negative.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Loading the recorded shotfile failed.
    #[error(transparent)]
    Shotfile(#[from] shotcmp_shotfile::ShotfileError),

    /// The tracer collaborator reported a fatal error.
    #[error(transparent)]
    Trace(#[from] shotcmp_trace::TraceError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, CompareError>;
