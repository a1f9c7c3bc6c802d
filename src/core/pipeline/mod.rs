//! Pipeline state, hazard analysis and recovery transformations.

/// Stall and flush snapshot transformations.
pub mod control;

/// Pure hazard classification for both operand sites.
pub mod hazards;

/// Stage records and the double-buffered snapshot.
pub mod latches;

pub use hazards::Hazard;
pub use latches::Snapshot;
