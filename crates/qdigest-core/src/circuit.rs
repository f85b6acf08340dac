//! Gate and circuit definitions for the fixed digest sequence.
//!
//! Gates are small composable operators over a [`Statevector`] rather
//! than a hard-wired pipeline, so each stage of the digest circuit can
//! be built, inspected, and tested on its own.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::statevector::Statevector;

/// A unitary operation over one or two qubits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Bit-flip (Pauli-X) on a qubit.
    X(usize),
    /// Hadamard on a qubit.
    H(usize),
    /// Controlled-phase rotation.
    CP {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Pairwise bit-swap of two qubits.
    Swap(usize, usize),
    /// Controlled-NOT.
    CX {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
}

impl Gate {
    /// Apply this gate in place.
    pub fn apply(&self, sv: &mut Statevector) {
        match *self {
            Gate::X(q) => sv.apply_x(q),
            Gate::H(q) => sv.apply_h(q),
            Gate::CP {
                control,
                target,
                theta,
            } => sv.apply_cp(control, target, theta),
            Gate::Swap(a, b) => sv.apply_swap(a, b),
            Gate::CX { control, target } => sv.apply_cx(control, target),
        }
    }

    /// Gate name in lowercase, matching common circuit notation.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X(_) => "x",
            Gate::H(_) => "h",
            Gate::CP { .. } => "cp",
            Gate::Swap(..) => "swap",
            Gate::CX { .. } => "cx",
        }
    }
}

/// An ordered, named gate sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gates: Vec::new(),
        }
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when the circuit holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Append a gate.
    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Apply every gate in order.
    pub fn apply_to(&self, sv: &mut Statevector) {
        for gate in &self.gates {
            gate.apply(sv);
        }
    }

    // =========================================================================
    // Stage constructors for the digest sequence
    // =========================================================================

    /// Stage 1: X on every qubit whose pattern bit is set.
    pub fn bit_init(pattern: &[bool]) -> Self {
        let mut circuit = Self::new("bit_init");
        for (q, &bit) in pattern.iter().enumerate() {
            if bit {
                circuit.push(Gate::X(q));
            }
        }
        circuit
    }

    /// Stage 2: Hadamard on every qubit, increasing index order.
    pub fn superposition(n_qubits: usize) -> Self {
        let mut circuit = Self::new("superposition");
        for q in 0..n_qubits {
            circuit.push(Gate::H(q));
        }
        circuit
    }

    /// Stage 3: Quantum Fourier Transform over all qubits.
    ///
    /// For each qubit `j` (most-significant first): Hadamard, then a
    /// controlled-phase of `π / 2^(k−j)` from every later qubit `k`.
    /// A final layer of pairwise swaps reverses the qubit bit order.
    pub fn qft(n_qubits: usize) -> Self {
        let mut circuit = Self::new("qft");
        for j in 0..n_qubits {
            circuit.push(Gate::H(j));
            for k in j + 1..n_qubits {
                circuit.push(Gate::CP {
                    control: k,
                    target: j,
                    theta: PI / (1u64 << (k - j)) as f64,
                });
            }
        }
        for i in 0..n_qubits / 2 {
            circuit.push(Gate::Swap(i, n_qubits - 1 - i));
        }
        circuit
    }

    /// Stage 4: entangling chain of CX(i, i+1) for increasing `i`.
    pub fn entangle(n_qubits: usize) -> Self {
        let mut circuit = Self::new("entangle");
        for i in 0..n_qubits.saturating_sub(1) {
            circuit.push(Gate::CX {
                control: i,
                target: i + 1,
            });
        }
        circuit
    }

    /// Stage 5: exact adjoint of [`Circuit::qft`].
    ///
    /// Swaps first, then for each qubit in reverse order the negated
    /// rotations (innermost first) followed by the Hadamard.
    pub fn qft_inverse(n_qubits: usize) -> Self {
        let mut circuit = Self::new("qft_inverse");
        for i in (0..n_qubits / 2).rev() {
            circuit.push(Gate::Swap(i, n_qubits - 1 - i));
        }
        for j in (0..n_qubits).rev() {
            for k in (j + 1..n_qubits).rev() {
                circuit.push(Gate::CP {
                    control: k,
                    target: j,
                    theta: -PI / (1u64 << (k - j)) as f64,
                });
            }
            circuit.push(Gate::H(j));
        }
        circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} gates)", self.name, self.gates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_init_flips_only_set_bits() {
        let pattern = [true, false, true];
        let circuit = Circuit::bit_init(&pattern);
        assert_eq!(circuit.gates(), &[Gate::X(0), Gate::X(2)]);

        let mut sv = Statevector::new(3).unwrap();
        circuit.apply_to(&mut sv);
        // Pattern 101 → basis index 0b101 = 5.
        assert!((sv.amplitude(5).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn superposition_is_one_h_per_qubit() {
        let circuit = Circuit::superposition(4);
        assert_eq!(circuit.len(), 4);
        assert!(circuit.gates().iter().all(|g| g.name() == "h"));
    }

    #[test]
    fn qft_gate_count() {
        // n Hadamards + n(n-1)/2 rotations + n/2 swaps.
        let n = 5;
        let circuit = Circuit::qft(n);
        assert_eq!(circuit.len(), n + n * (n - 1) / 2 + n / 2);
    }

    #[test]
    fn qft_inverse_mirrors_qft() {
        let fwd = Circuit::qft(4);
        let inv = Circuit::qft_inverse(4);
        assert_eq!(fwd.len(), inv.len());
        // Adjoint: reversed order with negated angles.
        for (g, h) in fwd.gates().iter().zip(inv.gates().iter().rev()) {
            match (g, h) {
                (
                    Gate::CP { theta: a, .. },
                    Gate::CP { theta: b, .. },
                ) => assert!((a + b).abs() < 1e-15),
                _ => assert_eq!(g, h),
            }
        }
    }

    #[test]
    fn entangle_is_a_nearest_neighbour_chain() {
        let circuit = Circuit::entangle(4);
        assert_eq!(
            circuit.gates(),
            &[
                Gate::CX {
                    control: 0,
                    target: 1
                },
                Gate::CX {
                    control: 1,
                    target: 2
                },
                Gate::CX {
                    control: 2,
                    target: 3
                },
            ]
        );
    }

    #[test]
    fn superposition_closed_form_signs() {
        // After bit_init(pattern) then H on every qubit, the amplitude
        // at basis index x is (-1)^popcount(x & pattern) / sqrt(2^n).
        let n = 4;
        let pre = crate::predigest::PreDigest::new(b"abc", n).unwrap();
        let pattern_idx = pre.pattern_index();

        let mut sv = Statevector::new(n).unwrap();
        Circuit::bit_init(pre.pattern()).apply_to(&mut sv);
        Circuit::superposition(n).apply_to(&mut sv);

        let magnitude = 1.0 / (1 << n) as f64;
        for x in 0..(1 << n) {
            let sign = if (x & pattern_idx).count_ones() % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            let amp = sv.amplitude(x);
            assert!((amp.re - sign * magnitude.sqrt()).abs() < 1e-12);
            assert!(amp.im.abs() < 1e-12);
        }
    }
}
