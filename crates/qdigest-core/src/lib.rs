//! `qdigest-core` — deterministic quantum-circuit password digests.
//!
//! Turns a password into a fixed-length hex digest by running a small
//! state-vector simulation seeded from a classical SHA-256 pre-digest:
//!
//! 1. **Pre-digest** — SHA-256 of the password; the first 5 hex chars
//!    become a 20-bit initialization pattern, the last 16 become the
//!    digest tail ([`predigest`]).
//! 2. **Gate stages** — bit initialization, a Hadamard layer, the
//!    Quantum Fourier Transform, a CX entangling chain, and the
//!    inverse Fourier transform ([`circuit`], [`statevector`]).
//! 3. **Measurement** — 1024 seeded shots over the final amplitude
//!    distribution; the most frequent basis index wins, ties broken
//!    toward the smallest index ([`sampler`]).
//! 4. **Assembly** — the winner as zero-padded hex plus the tail
//!    ([`pipeline`]).
//!
//! The pipeline is pure: identical `(password, seed)` always produce
//! the identical string, and concurrent calls share no state.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use qdigest_core::compute_hash;
//!
//! let stored = compute_hash(b"correct horse battery staple", None).unwrap();
//! // Later, at login time:
//! let presented = compute_hash(b"correct horse battery staple", Some(42)).unwrap();
//! assert_eq!(stored, presented);
//! ```
//!
//! # Security caveat
//!
//! This is *not* a vetted password hash. The "quantum" stage is a fixed
//! deterministic permutation of pre-digest bits; all collision
//! resistance comes from SHA-256, and the output is far shorter than a
//! SHA-256 digest. Treat it as a reproduction of the reference
//! behaviour, not as a KDF.

pub mod circuit;
pub mod error;
pub mod pipeline;
pub mod predigest;
pub mod sampler;
pub mod statevector;

pub use circuit::{Circuit, Gate};
pub use error::{DigestError, DigestResult};
pub use pipeline::{
    DEFAULT_QUBITS, MAX_QUBITS, NORM_TOLERANCE, QuantumDigest, Stage, compute_hash,
};
pub use predigest::PreDigest;
pub use sampler::{DEFAULT_SEED, DEFAULT_SHOTS, MeasurementOutcome, Sampler};
pub use statevector::Statevector;
