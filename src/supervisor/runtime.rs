use super::execution::execute_phase;
use super::types::{Phase, PhaseOutcome, Transition};
use super::Supervisor;
use tracing::{debug, info, warn};

impl Supervisor {
    /// Run the control loop until `Finish` and return the process exit status
    pub fn run(&mut self) -> i32 {
        info!(
            "Starting main loop with {} component(s)",
            self.components.len()
        );

        while self.advance().is_some() {}

        let status = self.exit_status();
        info!("Finish with exit status {} ({})", status, self.stats);
        status
    }

    /// Execute the current phase and move to the next one.
    ///
    /// Returns `None` once the supervisor is in `Finish`.
    pub fn advance(&mut self) -> Option<Transition> {
        let from = self.phase;

        let outcome = match from {
            Phase::Finish => return None,
            Phase::Init => None,
            phase => {
                let outcome = execute_phase(phase, &mut self.components, &self.stop);
                self.stats.record_execution(phase, outcome);
                self.last_outcome = Some(outcome);
                Some(outcome)
            }
        };

        let to = from.next(outcome.unwrap_or(PhaseOutcome::Ok));

        if from == Phase::AcquireNonCritical && to == Phase::AcquireNonCritical {
            warn!("Non-critical resources unavailable, retrying acquisition");
        }

        debug!(
            from = %from,
            outcome = outcome.map(|o| o.as_str()).unwrap_or("-"),
            to = %to,
            "State transition"
        );

        self.phase = to;
        self.stats.record_transition();

        Some(Transition { from, outcome, to })
    }

    /// `1` if the last executed phase failed, `0` otherwise
    pub fn exit_status(&self) -> i32 {
        match self.last_outcome {
            Some(PhaseOutcome::Fail) => 1,
            _ => 0,
        }
    }
}
