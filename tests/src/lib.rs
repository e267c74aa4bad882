//! # BlockLife Test Suite
//!
//! Unified test crate for behaviour that spans subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the grid and matcher
//! └── src/integration/
//!     ├── harness.rs        # Container + recording presenter
//!     ├── flows.rs          # Commands, pattern clears, turn sequencing
//!     ├── notifications.rs  # Presenter registry behaviour end to end
//!     └── properties.rs     # Property tests over the wired container
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bl-tests
//!
//! # By category
//! cargo test -p bl-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p bl-tests
//! ```

pub mod integration;
