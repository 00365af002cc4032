use crate::component::{ComponentResult, ManagedComponent};
use crate::config::DemoConfig;
use crate::error::ComponentError;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Sample component that works for a fixed number of steps, then fails so the
/// supervisor cycles it through release and re-acquisition.
pub struct DemoComponent {
    step_interval: Duration,
    steps_per_cycle: u32,
    step_counter: u32,
}

impl DemoComponent {
    pub fn new(step_interval: Duration, steps_per_cycle: u32) -> Self {
        Self {
            step_interval,
            steps_per_cycle,
            step_counter: 0,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(
            Duration::from_millis(config.step_interval_ms),
            config.steps_per_cycle,
        )
    }

    pub fn step_counter(&self) -> u32 {
        self.step_counter
    }
}

impl ManagedComponent for DemoComponent {
    fn name(&self) -> &str {
        "demo"
    }

    fn acquire_non_critical(&mut self) -> ComponentResult {
        self.step_counter = 0;
        info!("Demo component ready for {} steps", self.steps_per_cycle);
        Ok(())
    }

    fn step(&mut self) -> ComponentResult {
        self.step_counter += 1;
        thread::sleep(self.step_interval);

        if self.step_counter > self.steps_per_cycle {
            return Err(ComponentError::failed(format!(
                "step budget of {} exhausted",
                self.steps_per_cycle
            )));
        }

        debug!("Demo step {}/{}", self.step_counter, self.steps_per_cycle);
        Ok(())
    }
}
