//! Verify command implementation.

use anyhow::Result;
use console::style;
use subtle::ConstantTimeEq;

use qdigest_core::QuantumDigest;

use super::common::{read_password, simulation_spinner};

/// Execute the verify command.
///
/// Any internal failure is reported as a generic authentication
/// failure; neither the recomputed digest nor the error detail leaks
/// to the caller.
pub fn execute(password: Option<&str>, expected: &str, seed: u64, qubits: usize) -> Result<()> {
    let password = read_password(password)?;

    let pipeline = QuantumDigest::new().with_seed(seed).with_qubits(qubits);

    let spinner = simulation_spinner(qubits);
    let recomputed = pipeline.digest(&password);
    spinner.finish_and_clear();

    let matches = match recomputed {
        Ok(digest) => digest.as_bytes().ct_eq(expected.as_bytes()).into(),
        Err(err) => {
            tracing::debug!(error = %err, "digest recomputation failed during verify");
            false
        }
    };

    if matches {
        println!("{} digest matches", style("✓").green().bold());
        Ok(())
    } else {
        println!("{} authentication failed", style("✗").red().bold());
        std::process::exit(1);
    }
}
