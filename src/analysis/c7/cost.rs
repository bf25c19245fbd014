//! Token/cost accounting for the C7 subsystem. Each `Executor` call
//! returns a token estimate; the aggregator sums across metrics under a
//! mutex (spec.md §4.4.2).

use parking_lot::Mutex;

/// Blended USD-per-million-tokens rate used when the scoring config does
/// not override it. Spec.md §9 leaves "should this be user-configurable"
/// as an open question; this implementation resolves it in favor of yes
/// (see `ScoringConfig.c7.blended_rate_usd_per_mtok` in `config.rs`) while
/// keeping this constant as the code-level default.
pub const DEFAULT_BLENDED_RATE_PER_MTOK: f64 = 6.0;

#[derive(Default)]
pub struct CostAccumulator {
    inner: Mutex<CostTotals>,
}

#[derive(Default, Clone, Copy)]
pub struct CostTotals {
    pub tokens: u64,
}

impl CostAccumulator {
    pub fn add_tokens(&self, tokens: u64) {
        self.inner.lock().tokens += tokens;
    }

    pub fn totals(&self) -> CostTotals {
        *self.inner.lock()
    }

    pub fn cost_usd(&self, blended_rate_per_mtok: f64) -> f64 {
        let tokens = self.totals().tokens;
        (tokens as f64 / 1_000_000.0) * blended_rate_per_mtok
    }
}
