//! # Piazza - Demo Client Library
//!
//! Library surface of the Piazza binary: the CLI definition, config
//! loading, and command implementations. Kept as a lib target so
//! integration tests can drive the same code paths as the binary.

pub mod cli;
