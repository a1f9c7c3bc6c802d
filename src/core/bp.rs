//! Branch prediction.
//!
//! One 2-bit saturating counter shared by every conditional branch in
//! the program. Decode0 consults it to redirect fetch speculatively;
//! Execute1 trains it with the resolved direction.

/// A single global 2-bit saturating counter.
#[derive(Clone, Debug, Default)]
pub struct BranchPredictor {
    counter: u8,
}

impl BranchPredictor {
    /// Creates a predictor in the strongly-not-taken state.
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Taken is predicted from the upper half of the counter range.
    pub fn predict_taken(&self) -> bool {
        self.counter > 1
    }

    /// Trains the counter with a resolved branch direction, saturating
    /// at 0 and 3.
    pub fn update(&mut self, taken: bool) {
        if taken {
            self.counter = (self.counter + 1).min(3);
        } else {
            self.counter = self.counter.saturating_sub(1);
        }
    }

    /// Current counter state, in 0..=3.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Returns the counter to the strongly-not-taken state.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
