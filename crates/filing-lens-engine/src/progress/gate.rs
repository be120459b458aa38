use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// The "analysis in progress" flag.
///
/// Cloned handles share one flag. New work is refused while it is set;
/// nothing is queued.
#[derive(Debug, Clone, Default)]
pub struct AnalysisGate {
    busy: Arc<AtomicBool>,
}

impl AnalysisGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Sets the flag, or returns `None` if it was already set.
    pub fn try_begin(&self) -> Option<AnalysisPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AnalysisPermit {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Proof of holding the gate; clears the flag on drop.
#[derive(Debug)]
pub struct AnalysisPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for AnalysisPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
