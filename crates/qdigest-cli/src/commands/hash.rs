//! Hash command implementation.

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use qdigest_core::QuantumDigest;

use super::common::{read_password, simulation_spinner};

/// Execute the hash command.
pub fn execute(
    password: Option<&str>,
    seed: u64,
    shots: u32,
    qubits: usize,
    format: &str,
) -> Result<()> {
    let password = read_password(password)?;

    let pipeline = QuantumDigest::new()
        .with_seed(seed)
        .with_shots(shots)
        .with_qubits(qubits);

    let spinner = simulation_spinner(qubits);
    let digest = pipeline
        .digest(&password)
        .context("digest computation failed")?;
    spinner.finish_and_clear();

    match format {
        "json" => {
            let report = json!({
                "digest": digest,
                "length": digest.len(),
                "qubits": qubits,
                "shots": shots,
                "seed": seed,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "{} {}",
                style("digest:").cyan().bold(),
                style(&digest).green()
            );
        }
    }

    Ok(())
}
