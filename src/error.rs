//! Error taxonomy for the resume pipeline.
//!
//! Only environment-missing conditions, user cancellation, and render failures
//! abort a run. Unavailable or malformed sources never surface here: the
//! synthesizer demotes them to deterministic fallbacks.

use std::path::PathBuf;
use thiserror::Error;

use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Not a git repository: {0}")]
    NoRepository(PathBuf),

    #[error("No commit history available in {0}")]
    NoCommits(PathBuf),

    #[error("Output location is not writable: {path}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Failed to render resume: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Whether this error represents a missing environment precondition
    /// (reported before any synthesis or write takes place).
    pub fn is_environment_missing(&self) -> bool {
        matches!(
            self,
            PipelineError::NoRepository(_)
                | PipelineError::NoCommits(_)
                | PipelineError::OutputNotWritable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_missing_classification() {
        assert!(PipelineError::NoRepository(PathBuf::from("/tmp/x")).is_environment_missing());
        assert!(PipelineError::NoCommits(PathBuf::from("/tmp/x")).is_environment_missing());
        assert!(!PipelineError::Cancelled.is_environment_missing());
    }

    #[test]
    fn render_error_message_keeps_cause() {
        let err = PipelineError::from(RenderError::Serialize("bad value".to_string()));
        assert!(err.to_string().contains("bad value"));
    }
}
