//! Shared helpers for CLI commands.

use std::io::Read;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

/// Resolve the password from the argument or, when omitted, stdin.
/// Trailing newlines from piped input are stripped.
pub fn read_password(arg: Option<&str>) -> Result<Vec<u8>> {
    match arg {
        Some(p) => Ok(p.as_bytes().to_vec()),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read password from stdin")?;
            let trimmed = buf.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() {
                bail!("no password provided");
            }
            Ok(trimmed.as_bytes().to_vec())
        }
    }
}

/// Spinner shown while the simulation runs. A 20-qubit register takes
/// a noticeable moment on a laptop.
pub fn simulation_spinner(qubits: usize) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("simulating {qubits}-qubit circuit..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
