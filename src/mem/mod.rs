//! Memory components of the SP system.

/// Single-ported synchronous SRAM model.
pub mod sram;

pub use sram::{Sram, SRAM_WORDS};
