//! Per-cycle stage transition functions.
//!
//! Stages are evaluated in pipeline order within a tick: Fetch0, Fetch1,
//! Decode0, Decode1, Execute0, Execute1. Every function reads the frozen
//! current snapshot and writes the next one, so the stages are logically
//! parallel; the serial order is observable only through the shared
//! memory port and the deliberate overrides described in
//! [`crate::core::pipeline::control`].

/// Decode0 (speculation, store/load freeze, field extraction) and
/// Decode1 (operand selection with bypass).
pub mod decode;

/// Execute0 (late bypass and compute) and Execute1 (write-back,
/// branch retirement).
pub mod execute;

/// Fetch0 and Fetch1.
pub mod fetch;
