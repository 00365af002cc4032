use super::types::{Operation, Phase, PhaseOutcome};
use crate::component::ManagedComponent;
use crate::signals::StopSignal;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info};

/// Run `phase` across `components` in registration order.
///
/// The first failing component ends the phase with `Fail`; components after it are
/// not called. A panic inside a component call is contained here and counts as a
/// failure. A pending stop request turns any result into `Stop`.
pub fn execute_phase(
    phase: Phase,
    components: &mut [Box<dyn ManagedComponent>],
    stop: &StopSignal,
) -> PhaseOutcome {
    let outcome = match phase.operation() {
        Some(operation) => run_operation(phase, operation, components),
        None => PhaseOutcome::Ok,
    };

    let outcome = if stop.is_stop_requested() {
        info!("Stop requested during {}", phase);
        PhaseOutcome::Stop
    } else {
        outcome
    };

    debug!("Result of {}: {}", phase, outcome);
    outcome
}

fn run_operation(
    phase: Phase,
    operation: Operation,
    components: &mut [Box<dyn ManagedComponent>],
) -> PhaseOutcome {
    for component in components.iter_mut() {
        let call = panic::catch_unwind(AssertUnwindSafe(|| operation(component.as_mut())));

        match call {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(
                    component = component.name(),
                    "Component failed in {}: {}", phase, e
                );
                return PhaseOutcome::Fail;
            }
            Err(payload) => {
                error!(
                    component = component.name(),
                    "Component panicked in {}: {}",
                    phase,
                    panic_message(payload.as_ref())
                );
                return PhaseOutcome::Fail;
            }
        }
    }

    PhaseOutcome::Ok
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
