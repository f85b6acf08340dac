//! The digest pipeline: pre-digest, gate stages, measurement, assembly.
//!
//! `Init → BitInit → Superpose → QFT → Entangle → InverseQFT → Measure
//! → Assemble`, linear with no branches. The whole computation is a
//! pure function of `(password, seed)`: all state is allocated per
//! call and dropped on every exit path, so concurrent callers need no
//! locking.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{DigestError, DigestResult};
use crate::predigest::{PreDigest, TAIL_HEX_CHARS};
use crate::sampler::{DEFAULT_SEED, DEFAULT_SHOTS, Sampler};
use crate::statevector::Statevector;

/// Default register width: 20 bits from the first 5 hex characters of
/// the classical pre-digest.
pub const DEFAULT_QUBITS: usize = 20;

/// Widest register the pipeline will attempt. Cost doubles per qubit;
/// 28 qubits is already a 4 GiB amplitude vector.
pub const MAX_QUBITS: usize = 28;

/// Allowed squared-norm drift after each gate stage.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// X gates driven by the pre-digest pattern.
    BitInit,
    /// Hadamard layer over every qubit.
    Superpose,
    /// Quantum Fourier Transform.
    Qft,
    /// Nearest-neighbour CX chain.
    Entangle,
    /// Adjoint of the Fourier transform.
    InverseQft,
    /// Shot sampling of the final state.
    Measure,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::BitInit => "bit_init",
            Stage::Superpose => "superposition",
            Stage::Qft => "qft",
            Stage::Entangle => "entangle",
            Stage::InverseQft => "qft_inverse",
            Stage::Measure => "measure",
        };
        f.write_str(name)
    }
}

/// Configurable digest pipeline.
///
/// The defaults reproduce the reference behaviour: 20 qubits, 1024
/// shots, seed 42. Identical configuration and password always yield
/// the identical digest string.
///
/// ```rust
/// use qdigest_core::QuantumDigest;
///
/// // A narrow register keeps the example fast; the reference width is 20.
/// let pipeline = QuantumDigest::new().with_qubits(8);
/// let digest = pipeline.digest(b"hunter22").unwrap();
/// assert_eq!(digest.len(), pipeline.digest_len());
/// assert_eq!(digest, pipeline.digest(b"hunter22").unwrap());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuantumDigest {
    qubits: usize,
    shots: u32,
    seed: u64,
    /// Wall-clock guard checked between stages; None disables it.
    deadline: Option<Duration>,
}

impl QuantumDigest {
    /// Pipeline with reference defaults.
    pub fn new() -> Self {
        Self {
            qubits: DEFAULT_QUBITS,
            shots: DEFAULT_SHOTS,
            seed: DEFAULT_SEED,
            deadline: None,
        }
    }

    /// Override the register width (positive multiple of 4).
    #[must_use]
    pub fn with_qubits(mut self, qubits: usize) -> Self {
        self.qubits = qubits;
        self
    }

    /// Override the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Override the sampler seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Abort the computation if it runs longer than `deadline`.
    /// Checked between pipeline stages, not inside a gate.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Register width used by this pipeline.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Length of the digest string this pipeline produces:
    /// `ceil(n/4)` hex digits for the winning index plus the 16-char
    /// classical tail.
    pub fn digest_len(&self) -> usize {
        self.qubits.div_ceil(4) + TAIL_HEX_CHARS
    }

    /// Compute the digest for `password`.
    #[instrument(skip(self, password), fields(qubits = self.qubits, shots = self.shots, seed = self.seed))]
    pub fn digest(&self, password: &[u8]) -> DigestResult<String> {
        self.validate()?;
        let start = Instant::now();

        let pre = PreDigest::new(password, self.qubits)?;
        let mut sv = Statevector::new(self.qubits)?;

        let stages: [(Stage, Circuit); 5] = [
            (Stage::BitInit, Circuit::bit_init(pre.pattern())),
            (Stage::Superpose, Circuit::superposition(self.qubits)),
            (Stage::Qft, Circuit::qft(self.qubits)),
            (Stage::Entangle, Circuit::entangle(self.qubits)),
            (Stage::InverseQft, Circuit::qft_inverse(self.qubits)),
        ];

        for (stage, circuit) in &stages {
            circuit.apply_to(&mut sv);
            self.check_norm(&sv, *stage)?;
            self.check_deadline(start, *stage)?;
            debug!(stage = %stage, gates = circuit.len(), "stage applied");
        }

        let outcome = Sampler::new(self.seed).with_shots(self.shots).measure(&sv);
        self.check_deadline(start, Stage::Measure)?;

        let digest = assemble(outcome.index, self.qubits, pre.tail());
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            winner = outcome.index,
            "digest assembled"
        );
        Ok(digest)
    }

    fn validate(&self) -> DigestResult<()> {
        if self.qubits > MAX_QUBITS {
            return Err(DigestError::ResourceExhausted {
                qubits: self.qubits,
                bytes: 1usize
                    .checked_shl(self.qubits as u32)
                    .unwrap_or(usize::MAX)
                    .saturating_mul(16),
            });
        }
        if self.shots == 0 {
            return Err(DigestError::InvalidInput(
                "shot count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    fn check_norm(&self, sv: &Statevector, stage: Stage) -> DigestResult<()> {
        let norm = sv.norm_sqr();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(DigestError::NormDrift { stage, norm });
        }
        Ok(())
    }

    fn check_deadline(&self, start: Instant, stage: Stage) -> DigestResult<()> {
        if let Some(deadline) = self.deadline {
            if start.elapsed() > deadline {
                return Err(DigestError::DeadlineExceeded { stage });
            }
        }
        Ok(())
    }
}

impl Default for QuantumDigest {
    fn default() -> Self {
        Self::new()
    }
}

/// Winning index as zero-padded lowercase hex, plus the classical tail.
///
/// The fixed width is deliberate: dropping leading zero nibbles (as
/// the reference did) makes the output length depend on the sampled
/// index and silently shrinks the digest space.
fn assemble(index: usize, qubits: usize, tail: &str) -> String {
    let width = qubits.div_ceil(4);
    format!("{index:0width$x}{tail}")
}

/// Compute the digest for `password` with the reference configuration.
///
/// Passing `None` for `seed` is identical to passing `Some(42)`, so a
/// registration call and a later login call agree.
pub fn compute_hash(password: &[u8], seed: Option<u64>) -> DigestResult<String> {
    QuantumDigest::new()
        .with_seed(seed.unwrap_or(DEFAULT_SEED))
        .digest(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_zero_pads_to_fixed_width() {
        assert_eq!(assemble(0x2a, 20, "deadbeefdeadbeef"), "0002adeadbeefdeadbeef");
        assert_eq!(assemble(0, 20, "deadbeefdeadbeef"), "00000deadbeefdeadbeef");
        assert_eq!(assemble(0xfffff, 20, "deadbeefdeadbeef").len(), 21);
    }

    #[test]
    fn digest_len_matches_formula() {
        assert_eq!(QuantumDigest::new().digest_len(), 21);
        assert_eq!(QuantumDigest::new().with_qubits(8).digest_len(), 18);
    }

    #[test]
    fn oversized_register_is_rejected() {
        let result = QuantumDigest::new().with_qubits(32).digest(b"pw");
        assert!(matches!(
            result,
            Err(DigestError::ResourceExhausted { qubits: 32, .. })
        ));
    }

    #[test]
    fn zero_shots_is_rejected() {
        let result = QuantumDigest::new().with_shots(0).digest(b"pw");
        assert!(matches!(result, Err(DigestError::InvalidInput(_))));
    }

    #[test]
    fn expired_deadline_aborts() {
        let result = QuantumDigest::new()
            .with_qubits(12)
            .with_deadline(Duration::ZERO)
            .digest(b"pw");
        assert!(matches!(result, Err(DigestError::DeadlineExceeded { .. })));
    }
}
