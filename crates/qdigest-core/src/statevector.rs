//! Statevector simulation engine.
//!
//! A register of `n` qubits is modeled as a dense vector of `2^n`
//! complex amplitudes. Qubit `q` addresses bit `q` of the basis index
//! (mask `1 << q`). All gate primitives are in-place linear transforms
//! that preserve the vector norm.

use num_complex::Complex64;

use crate::error::{DigestError, DigestResult};

/// A statevector representing a quantum register.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    ///
    /// The allocation is fallible: a register of `n` qubits needs
    /// `2^n * 16` bytes, which for large `n` can legitimately fail.
    /// Widths at or beyond the pointer size cannot even be addressed
    /// and are rejected outright.
    pub fn new(num_qubits: usize) -> DigestResult<Self> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or(DigestError::ResourceExhausted {
                qubits: num_qubits,
                bytes: usize::MAX,
            })?;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(dim)
            .map_err(|_| DigestError::ResourceExhausted {
                qubits: num_qubits,
                bytes: dim.saturating_mul(std::mem::size_of::<Complex64>()),
            })?;
        amplitudes.resize(dim, Complex64::new(0.0, 0.0));
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the amplitude vector (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude at a basis index.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Sum of squared magnitudes. Unity within 1e-9 for any state
    /// reachable through the gate primitives below.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Measurement probabilities, one per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Rescale so the squared norm is exactly 1.
    pub fn renormalize(&mut self) {
        let norm = self.norm_sqr().sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
    }

    /// Overwrite the amplitudes from a slice. Used by tests and by
    /// callers that already hold a normalized vector.
    pub fn load(&mut self, amplitudes: &[Complex64]) {
        assert_eq!(amplitudes.len(), self.dim());
        self.amplitudes.copy_from_slice(amplitudes);
    }

    // =========================================================================
    // Gate primitives
    // =========================================================================

    /// Bit-flip (Pauli-X): swaps amplitude pairs whose basis indices
    /// differ only in `qubit`.
    pub fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    /// Hadamard on `qubit`.
    pub fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Controlled-phase: multiplies by `e^{iθ}` where both `control`
    /// and `target` bits are set.
    pub fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let both = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..self.dim() {
            if i & both == both {
                self.amplitudes[i] *= phase;
            }
        }
    }

    /// Pairwise bit-swap of qubits `a` and `b`.
    pub fn apply_swap(&mut self, a: usize, b: usize) {
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        for i in 0..self.dim() {
            if (i & mask_a != 0) && (i & mask_b == 0) {
                let j = (i & !mask_a) | mask_b;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Controlled-NOT: flips the `target` bit of every basis index
    /// whose `control` bit is 1.
    pub fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn initial_state_is_all_zero_basis() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitude(0), Complex64::new(1.0, 0.0)));
        for i in 1..4 {
            assert!(approx_eq(sv.amplitude(i), Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn x_flips_basis_state() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_x(0);
        assert!(approx_eq(sv.amplitude(0), Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn h_creates_equal_superposition() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_h(0);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitude(0), Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn h_cx_builds_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitude(0), Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitude(2), Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitude(3), Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn cp_phases_only_the_11_subspace() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_h(0);
        sv.apply_h(1);
        sv.apply_cp(0, 1, std::f64::consts::PI);
        // CP(π) == CZ: index 3 picks up a sign, the rest are untouched.
        assert!(approx_eq(sv.amplitude(3), Complex64::new(-0.5, 0.0)));
        assert!(approx_eq(sv.amplitude(0), Complex64::new(0.5, 0.0)));
    }

    #[test]
    fn swap_exchanges_bits() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_x(0); // |01⟩ (index 1)
        sv.apply_swap(0, 1); // → |10⟩ (index 2)
        assert!(approx_eq(sv.amplitude(2), Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn unaddressable_register_width_is_rejected() {
        for qubits in [64usize, 65, usize::MAX] {
            assert!(matches!(
                Statevector::new(qubits),
                Err(DigestError::ResourceExhausted { qubits: q, .. }) if q == qubits
            ));
        }
    }

    #[test]
    fn gates_preserve_norm() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply_x(1);
        sv.apply_h(0);
        sv.apply_h(2);
        sv.apply_cp(0, 2, 0.7);
        sv.apply_cx(0, 1);
        sv.apply_swap(0, 2);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }
}
