//! Test-only crate. The actual suites live under `tests/`.
