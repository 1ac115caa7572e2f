//! Error types for the blend command.

use serde::{Deserialize, Serialize};

use crate::ids::VertexId;

/// Failures the blend command can report. Insufficient selection and a
/// missing deformer are not errors; they are silent-skip outcomes carried by
/// [`crate::command::ExecuteOutcome`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BlendError {
    /// Every pairwise distance in the selection is zero
    #[error("degenerate geometry: all {vertex_count} selected vertices coincide")]
    DegenerateGeometry { vertex_count: usize },

    /// A blended weight row summed to zero and cannot be renormalized
    #[error("degenerate weights: blended row for {vertex} sums to zero")]
    DegenerateWeights { vertex: VertexId },

    /// Host weight buffer does not match selection length x influence count
    #[error("weight buffer length mismatch: expected {expected}, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    /// Unrecognized command flag
    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: String },

    /// Flag present without its boolean argument
    #[error("flag {flag} is missing its value")]
    MissingFlagValue { flag: String },

    /// Flag argument could not be read as a boolean
    #[error("flag {flag} has invalid value '{value}'")]
    InvalidFlagValue { flag: String, value: String },

    /// Undo/redo requested before any blend was applied
    #[error("no blend has been applied")]
    NothingApplied,

    /// Host could not resolve a vertex id
    #[error("vertex not found: {vertex}")]
    VertexNotFound { vertex: VertexId },

    /// Opaque host-side failure
    #[error("host error: {reason}")]
    Host { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl BlendError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DegenerateGeometry { .. } => "geometry",
            Self::DegenerateWeights { .. } | Self::WeightCountMismatch { .. } => "weights",
            Self::UnknownFlag { .. }
            | Self::MissingFlagValue { .. }
            | Self::InvalidFlagValue { .. } => "args",
            Self::NothingApplied => "command",
            Self::VertexNotFound { .. } | Self::Host { .. } => "host",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for BlendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err = BlendError::DegenerateGeometry { vertex_count: 4 };
        assert_eq!(err.category(), "geometry");
        let err = BlendError::UnknownFlag {
            flag: "-x".to_string(),
        };
        assert_eq!(err.category(), "args");
    }

    #[test]
    fn serde_roundtrip() {
        let err = BlendError::DegenerateWeights {
            vertex: VertexId(3),
        };
        let s = serde_json::to_string(&err).unwrap();
        let back: BlendError = serde_json::from_str(&s).unwrap();
        assert_eq!(err, back);
    }
}
