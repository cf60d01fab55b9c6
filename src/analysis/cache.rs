use super::{AnalysisSeed, ProcOptInfo};
use crate::processor::FragmentStage;

/// Memoized [`ProcOptInfo`] for one stage chain, keyed by the seed it was computed from.
///
/// The owner must call [`InvariantCache::invalidate`] whenever the chain changes; staleness is
/// never detected by comparing chain contents.
#[derive(Clone, Debug, Default)]
pub struct InvariantCache {
    valid: bool,
    seed: AnalysisSeed,
    result: ProcOptInfo,
    computations: u64,
}

impl InvariantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result when it was computed from `seed`, otherwise walks `stages`.
    pub fn get_or_compute(&mut self, stages: &[FragmentStage], seed: AnalysisSeed) -> &ProcOptInfo {
        if !self.valid || self.seed != seed {
            tracing::trace!(
                stages = stages.len(),
                was_valid = self.valid,
                "recomputing invariant output"
            );
            self.result = ProcOptInfo::calc_with_seed(stages, seed);
            self.seed = seed;
            self.valid = true;
            self.computations += 1;
        }
        &self.result
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn cached_seed(&self) -> Option<AnalysisSeed> {
        self.valid.then_some(self.seed)
    }

    /// The cached result, if any. Never recomputes.
    pub fn result(&self) -> Option<&ProcOptInfo> {
        self.valid.then_some(&self.result)
    }

    /// Number of chain walks performed so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/cache.rs"]
mod tests;
