//! Error types for the digest pipeline.

use thiserror::Error;

use crate::pipeline::Stage;

/// Errors produced while computing a quantum digest.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DigestError {
    /// The password or pipeline configuration is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The amplitude vector lost unit norm after a pipeline stage.
    ///
    /// Every gate is unitary, so this indicates a defect in the gate
    /// implementations rather than a user-facing condition.
    #[error("amplitude norm drifted to {norm} after {stage} stage")]
    NormDrift {
        /// Pipeline stage that produced the drift.
        stage: Stage,
        /// Observed squared norm.
        norm: f64,
    },

    /// The amplitude vector could not be allocated.
    #[error("cannot allocate statevector for {qubits} qubits ({bytes} bytes)")]
    ResourceExhausted {
        /// Requested register width.
        qubits: usize,
        /// Requested allocation size.
        bytes: usize,
    },

    /// The optional per-call deadline elapsed between stages.
    #[error("digest deadline exceeded during {stage} stage")]
    DeadlineExceeded {
        /// Stage that was running when the deadline tripped.
        stage: Stage,
    },
}

/// Result type for digest operations.
pub type DigestResult<T> = Result<T, DigestError>;
