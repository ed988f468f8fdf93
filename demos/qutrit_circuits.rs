//! Runs three qutrit circuits and prints every intermediate state.
//!
//! `RUST_LOG=qudit_sim=debug cargo run --example qutrit_circuits` also shows
//! the per-gate log lines.

use qudit_sim::{Dimension, QuditResult, Simulator};

fn run_circuit(num_qudits: usize, instructions: &[&str]) -> QuditResult<Simulator> {
    let mut sim = Simulator::builder(num_qudits)
        .dimension(Dimension::Qutrit)
        .instructions(instructions.iter().copied())
        .track_history(true)
        .build()?;
    sim.run()?;
    Ok(sim)
}

fn main() -> QuditResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // circuit 1: 3 qutrits, H(0), H(2), CSWAP(0,1,2)
    let sim1 = run_circuit(3, &["h3-0", "h3-2", "cswap3-0,1,2"])?;
    println!("--- circuit 1 ---\n{}\n", sim1);

    // circuit 2: 5 qutrits; the last swap is controlled by a qutrit still in |0>
    let sim2 = run_circuit(5, &["h3-0", "h3-1", "h3-2", "cswap3-0,1,3", "cswap3-4,2,1"])?;
    println!("--- circuit 2 ---\n{:#}\n", sim2);

    // circuit 3: 10 qutrits, 243 basis states in equal superposition
    let sim3 = run_circuit(10, &["h3-0", "h3-1", "h3-2", "h3-3", "h3-4", "cswap3-0,1,9"])?;
    println!("--- circuit 3 ---\n{:#}", sim3);

    Ok(())
}
