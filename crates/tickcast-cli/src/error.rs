use thiserror::Error;

use tickcast_core::PipelineFailure;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineFailure),

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Pipeline(PipelineFailure::DataUnavailable { .. }) => 3,
            Self::Pipeline(PipelineFailure::InsufficientHistory { .. }) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Pipeline(PipelineFailure::Internal { .. })
            | Self::Serialization(_)
            | Self::Io(_) => 10,
        }
    }
}
