pub mod component;
pub mod config;
pub mod demo;
pub mod error;
pub mod signals;
pub mod stats;
pub mod supervisor;

pub use component::{ComponentResult, ManagedComponent};
pub use config::{DemoConfig, LoggingConfig, SupervisorConfig};
pub use demo::DemoComponent;
pub use error::{ComponentError, Result, SupervisorError};
pub use signals::StopSignal;
pub use stats::RunStats;
pub use supervisor::{execute_phase, Phase, PhaseOutcome, Supervisor, Transition};
