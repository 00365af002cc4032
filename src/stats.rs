use crate::supervisor::{Phase, PhaseOutcome};
use std::fmt;

/// Counters collected by the supervisor over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    executions: [u64; Phase::RUNNABLE.len()],
    ok: u64,
    stop: u64,
    fail: u64,
    transitions: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one execution of `phase` and the outcome it produced
    pub fn record_execution(&mut self, phase: Phase, outcome: PhaseOutcome) {
        if let Some(index) = Phase::RUNNABLE.iter().position(|p| *p == phase) {
            self.executions[index] += 1;
        }

        match outcome {
            PhaseOutcome::Ok => self.ok += 1,
            PhaseOutcome::Stop => self.stop += 1,
            PhaseOutcome::Fail => self.fail += 1,
        }
    }

    pub fn record_transition(&mut self) {
        self.transitions += 1;
    }

    /// Number of times `phase` was executed
    pub fn executions(&self, phase: Phase) -> u64 {
        Phase::RUNNABLE
            .iter()
            .position(|p| *p == phase)
            .map(|index| self.executions[index])
            .unwrap_or(0)
    }

    pub fn outcomes(&self, outcome: PhaseOutcome) -> u64 {
        match outcome {
            PhaseOutcome::Ok => self.ok,
            PhaseOutcome::Stop => self.stop,
            PhaseOutcome::Fail => self.fail,
        }
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transitions={}", self.transitions)?;
        for (phase, count) in Phase::RUNNABLE.iter().zip(self.executions.iter()) {
            write!(f, " {}={}", phase, count)?;
        }
        write!(f, " ok={} stop={} fail={}", self.ok, self.stop, self.fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_execution() {
        let mut stats = RunStats::new();

        stats.record_execution(Phase::Step, PhaseOutcome::Ok);
        stats.record_execution(Phase::Step, PhaseOutcome::Fail);
        stats.record_execution(Phase::ReleaseCritical, PhaseOutcome::Stop);

        assert_eq!(stats.executions(Phase::Step), 2);
        assert_eq!(stats.executions(Phase::ReleaseCritical), 1);
        assert_eq!(stats.executions(Phase::AcquireCritical), 0);
        assert_eq!(stats.outcomes(PhaseOutcome::Ok), 1);
        assert_eq!(stats.outcomes(PhaseOutcome::Fail), 1);
        assert_eq!(stats.outcomes(PhaseOutcome::Stop), 1);
    }

    #[test]
    fn test_non_runnable_phases_have_no_executions() {
        let mut stats = RunStats::new();
        stats.record_execution(Phase::Init, PhaseOutcome::Ok);

        assert_eq!(stats.executions(Phase::Init), 0);
        assert_eq!(stats.executions(Phase::Finish), 0);
    }

    #[test]
    fn test_display_summary() {
        let mut stats = RunStats::new();
        stats.record_execution(Phase::AcquireCritical, PhaseOutcome::Fail);
        stats.record_transition();

        let summary = stats.to_string();
        assert!(summary.starts_with("transitions=1"));
        assert!(summary.contains("ACQUIRE_CRITICAL=1"));
        assert!(summary.ends_with("ok=0 stop=0 fail=1"));
    }
}
