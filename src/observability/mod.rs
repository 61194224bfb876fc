//! Observability subsystem.
//!
//! Progress and failures go through `tracing`. The final human-readable
//! summary is printed separately by the binary.

pub mod logging;
