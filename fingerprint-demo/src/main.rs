use std::time::Instant;

use machine_fingerprint::get_machine_fingerprint;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=machine_fingerprint=debug shows which queries failed.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let start = Instant::now();
    let fingerprint = get_machine_fingerprint();
    let elapsed = start.elapsed();

    tracing::debug!(micros = elapsed.as_micros(), "Fingerprint computed");

    println!(
        "Time taken to get machine fingerprint: {} ms",
        elapsed.as_micros() as f64 / 1000.0
    );
    println!("Machine Fingerprint: {fingerprint}");
}
