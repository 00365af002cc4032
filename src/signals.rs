use crate::error::{Result, SupervisorError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Process-wide stop request shared between the signal path and the control loop.
///
/// The flag starts cleared and only ever moves to "stop requested"; nothing resets it
/// during a run.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    requested: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an orderly stop. Returns `true` only for the first request.
    pub fn request_stop(&self) -> bool {
        !self.requested.swap(true, Ordering::SeqCst)
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Register the interrupt handlers that feed `stop`.
///
/// Must be called from within a tokio runtime. Registration happens synchronously so
/// a failure is reported before any phase runs; the returned task then sets the flag
/// on each delivered signal and does nothing else.
#[cfg(unix)]
pub fn install(stop: StopSignal) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).map_err(|source| {
        SupervisorError::SignalRegistration {
            signal: "SIGINT",
            source,
        }
    })?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(|source| {
        SupervisorError::SignalRegistration {
            signal: "SIGTERM",
            source,
        }
    })?;

    debug!("Registered SIGINT and SIGTERM handlers");

    Ok(tokio::spawn(async move {
        loop {
            let name = tokio::select! {
                Some(()) = sigint.recv() => "SIGINT",
                Some(()) = sigterm.recv() => "SIGTERM",
                else => break,
            };
            notify(&stop, name);
        }
    }))
}

#[cfg(windows)]
pub fn install(stop: StopSignal) -> Result<JoinHandle<()>> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c().map_err(|source| {
        SupervisorError::SignalRegistration {
            signal: "Ctrl-C",
            source,
        }
    })?;

    debug!("Registered Ctrl-C handler");

    Ok(tokio::spawn(async move {
        while ctrl_c.recv().await.is_some() {
            notify(&stop, "Ctrl-C");
        }
    }))
}

fn notify(stop: &StopSignal, name: &str) {
    if stop.request_stop() {
        info!("Received {}, stop requested", name);
    } else {
        debug!("Received {} while a stop is already pending", name);
    }
}
