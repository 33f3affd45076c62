//! Mock test-runner binary for integration testing
//!
//! Stands in for the NUnit console runner: prints each argument it
//! received on its own line so tests can assert on the exact argv, then
//! exits with `MOCK_RUNNER_EXIT` (default 0).

fn main() {
    for arg in std::env::args().skip(1) {
        println!("{arg}");
    }
    eprintln!("mock runner finished");

    let exit_code = std::env::var("MOCK_RUNNER_EXIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    std::process::exit(exit_code);
}
