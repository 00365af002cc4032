mod execution;
mod orchestrator;
mod runtime;
mod types;


pub use orchestrator::Supervisor;
pub use execution::execute_phase;
pub use types::{Phase, PhaseOutcome, Transition};
