use crate::component::{ComponentResult, ManagedComponent};
use std::fmt;

/// Lifecycle phases, in the order the supervisor normally visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    AcquireCritical,
    AcquireNonCritical,
    Step,
    ReleaseNonCritical,
    ReleaseCritical,
    Finish,
}

/// Component operation invoked for a runnable phase
pub(crate) type Operation = fn(&mut dyn ManagedComponent) -> ComponentResult;

impl Phase {
    /// Phases that execute a component operation
    pub const RUNNABLE: [Phase; 5] = [
        Phase::AcquireCritical,
        Phase::AcquireNonCritical,
        Phase::Step,
        Phase::ReleaseNonCritical,
        Phase::ReleaseCritical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "INIT",
            Phase::AcquireCritical => "ACQUIRE_CRITICAL",
            Phase::AcquireNonCritical => "ACQUIRE_NONCRITICAL",
            Phase::Step => "STEP",
            Phase::ReleaseNonCritical => "RELEASE_NONCRITICAL",
            Phase::ReleaseCritical => "RELEASE_CRITICAL",
            Phase::Finish => "FINISH",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finish)
    }

    /// Next phase given the outcome of executing this one.
    ///
    /// `Init` moves on unconditionally and `Finish` has no outgoing transition, so
    /// both ignore `outcome`.
    pub fn next(self, outcome: PhaseOutcome) -> Phase {
        use PhaseOutcome::{Fail, Ok, Stop};

        match (self, outcome) {
            (Phase::Init, _) => Phase::AcquireCritical,

            (Phase::AcquireCritical, Ok) => Phase::AcquireNonCritical,
            (Phase::AcquireCritical, Fail | Stop) => Phase::Finish,

            (Phase::AcquireNonCritical, Ok) => Phase::Step,
            (Phase::AcquireNonCritical, Fail) => Phase::AcquireNonCritical,
            (Phase::AcquireNonCritical, Stop) => Phase::ReleaseCritical,

            (Phase::Step, Ok) => Phase::Step,
            (Phase::Step, Fail | Stop) => Phase::ReleaseNonCritical,

            (Phase::ReleaseNonCritical, Ok | Fail) => Phase::AcquireNonCritical,
            (Phase::ReleaseNonCritical, Stop) => Phase::ReleaseCritical,

            (Phase::ReleaseCritical, _) => Phase::Finish,

            (Phase::Finish, _) => Phase::Finish,
        }
    }

    /// Component operation run by this phase, or `None` for `Init` and `Finish`
    pub(crate) fn operation(self) -> Option<Operation> {
        let operation: Operation = match self {
            Phase::AcquireCritical => |c| c.acquire_critical(),
            Phase::AcquireNonCritical => |c| c.acquire_non_critical(),
            Phase::Step => |c| c.step(),
            Phase::ReleaseNonCritical => |c| c.release_non_critical(),
            Phase::ReleaseCritical => |c| c.release_critical(),
            Phase::Init | Phase::Finish => return None,
        };
        Some(operation)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated result of running one phase across all components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseOutcome {
    Ok,
    Stop,
    Fail,
}

impl PhaseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseOutcome::Ok => "OK",
            PhaseOutcome::Stop => "STOP",
            PhaseOutcome::Fail => "FAIL",
        }
    }
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    /// `None` when `from` runs no component operation (`Init`)
    pub outcome: Option<PhaseOutcome>,
    pub to: Phase,
}
