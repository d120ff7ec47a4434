use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide control channel counters.
pub struct ControlMetrics;

static VERSION_QUERIES_ANSWERED: AtomicU64 = AtomicU64::new(0);
static EMPTY_RUN_RESPONSES: AtomicU64 = AtomicU64::new(0);
static REQUIREMENTS_SATISFIED: AtomicU64 = AtomicU64::new(0);
static REQUIREMENTS_REJECTED: AtomicU64 = AtomicU64::new(0);
static VALIDATION_FAILURES: AtomicU64 = AtomicU64::new(0);

impl ControlMetrics {
    #[inline]
    pub(crate) fn record_version_query() {
        VERSION_QUERIES_ANSWERED.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_empty_response() {
        EMPTY_RUN_RESPONSES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_requirement(satisfied: bool) {
        if satisfied {
            REQUIREMENTS_SATISFIED.fetch_add(1, Ordering::Relaxed);
        } else {
            REQUIREMENTS_REJECTED.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_validation_failure() {
        VALIDATION_FAILURES.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    #[must_use]
    pub fn snapshot() -> ControlMetricsSnapshot {
        ControlMetricsSnapshot {
            version_queries_answered: VERSION_QUERIES_ANSWERED.load(Ordering::Relaxed),
            empty_run_responses: EMPTY_RUN_RESPONSES.load(Ordering::Relaxed),
            requirements_satisfied: REQUIREMENTS_SATISFIED.load(Ordering::Relaxed),
            requirements_rejected: REQUIREMENTS_REJECTED.load(Ordering::Relaxed),
            validation_failures: VALIDATION_FAILURES.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of the control channel counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMetricsSnapshot {
    /// `Run` requests answered with a version
    pub version_queries_answered: u64,
    /// `Run` requests answered with a null output
    pub empty_run_responses: u64,
    /// `RunOrClosePipe` requirements the local version met
    pub requirements_satisfied: u64,
    /// `RunOrClosePipe` requirements that must close the pipe
    pub requirements_rejected: u64,
    /// Control messages rejected by validation
    pub validation_failures: u64,
}

impl ControlMetricsSnapshot {
    /// Total control messages handled, rejected ones included.
    #[must_use]
    pub fn total_handled(&self) -> u64 {
        self.version_queries_answered
            + self.empty_run_responses
            + self.requirements_satisfied
            + self.requirements_rejected
            + self.validation_failures
    }
}
