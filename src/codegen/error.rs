use thiserror::Error;

/// Result alias for translation.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Every variant except `Io` means the input model is malformed. All of them
/// abort translation of the whole test; callers should discard the sink.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("locator {index}: missing/invalid type '{kind}'")]
    LocatorInvalidType { index: usize, kind: String },

    #[error("locator {index}: attribute locator missing/invalid key")]
    AttributeMissingKey { index: usize },

    #[error("locator {index}: invalid position {position}")]
    LocatorInvalidPosition { index: usize, position: i64 },

    #[error("{step}: invalid step type '{kind}'")]
    StepTypeInvalid { step: String, kind: String },

    #[error("{step}: wait_until '{until}' is missing/invalid")]
    StepUntilInvalid { step: String, until: String },

    #[error("{step}: assertion type '{kind}' is missing/invalid")]
    AssertTypeInvalid { step: String, kind: String },

    #[error("{step}: click type '{kind}' is invalid")]
    ClickTypeInvalid { step: String, kind: String },

    #[error("{step}: {kind} step requires at least one locator")]
    StepMissingLocators { step: String, kind: String },

    /// A locator error, tagged with the step it belongs to
    #[error("{step}: {source}")]
    InStep {
        step: String,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("failed to write generated code: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Attach the owning step name to a locator error.
    pub fn in_step(self, step: &str) -> Self {
        TranslateError::InStep {
            step: step.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through step context.
    pub fn root(&self) -> &TranslateError {
        match self {
            TranslateError::InStep { source, .. } => source.root(),
            other => other,
        }
    }
}
