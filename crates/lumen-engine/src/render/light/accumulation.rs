/// Progressive accumulation bookkeeping.
///
/// The counter is the number of trace dispatches summed into the image since the last
/// reset. It only moves in [`Accumulator::advance`], which callers invoke once the
/// dispatch is certain to be encoded.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    iterations: u32,
    clear_pending: bool,
}

/// What the next dispatch must do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AccumulationStep {
    /// Zero the image before tracing.
    pub clear: bool,
    /// Counter value including this dispatch; the display pass divides by it.
    pub iterations: u32,
}

impl Accumulator {
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    /// Discards accumulated samples. Takes effect at the next dispatch.
    pub fn reset(&mut self) {
        self.iterations = 0;
        self.clear_pending = true;
    }

    pub fn advance(&mut self) -> AccumulationStep {
        let clear = std::mem::take(&mut self.clear_pending);
        self.iterations = self.iterations.saturating_add(1);
        AccumulationStep { clear, iterations: self.iterations }
    }
}
