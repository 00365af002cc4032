use super::types::{Phase, PhaseOutcome};
use crate::component::ManagedComponent;
use crate::error::{Result, SupervisorError};
use crate::signals::StopSignal;
use crate::stats::RunStats;
use tracing::debug;

/// Drives registered components through the lifecycle phases
pub struct Supervisor {
    pub(super) components: Vec<Box<dyn ManagedComponent>>,
    pub(super) phase: Phase,
    pub(super) last_outcome: Option<PhaseOutcome>,
    pub(super) stop: StopSignal,
    pub(super) stats: RunStats,
}

impl Supervisor {
    /// Create a supervisor observing the given stop signal
    pub fn new(stop: StopSignal) -> Self {
        Self {
            components: Vec::new(),
            phase: Phase::Init,
            last_outcome: None,
            stop,
            stats: RunStats::new(),
        }
    }

    /// Append a component; registration order is execution order in every phase.
    ///
    /// Only allowed before the run loop starts. Components with a blank name are
    /// rejected.
    pub fn register(&mut self, component: Box<dyn ManagedComponent>) -> Result<()> {
        if self.phase != Phase::Init {
            return Err(SupervisorError::invalid_registration(format!(
                "cannot register '{}' in phase {}",
                component.name(),
                self.phase
            )));
        }

        if component.name().trim().is_empty() {
            return Err(SupervisorError::invalid_registration(
                "component name must not be empty",
            ));
        }

        debug!(
            "Registered component '{}' at position {}",
            component.name(),
            self.components.len()
        );
        self.components.push(component);
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the most recently executed phase
    pub fn last_outcome(&self) -> Option<PhaseOutcome> {
        self.last_outcome
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Handle to the stop signal this supervisor observes
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }
}
