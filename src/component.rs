use crate::error::ComponentError;

/// Result of a single lifecycle operation on a managed component
pub type ComponentResult = std::result::Result<(), ComponentError>;

/// A pluggable unit driven through the supervisor's lifecycle phases.
///
/// Every operation defaults to success, so an implementation only overrides the
/// phases it cares about. Operations are expected to return promptly; the
/// supervisor imposes no timeout and a call that never returns stalls the loop.
pub trait ManagedComponent: Send {
    /// Name used to identify the component in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Acquire resources the process cannot run without
    fn acquire_critical(&mut self) -> ComponentResult {
        Ok(())
    }

    /// Acquire best-effort resources; failure is retried
    fn acquire_non_critical(&mut self) -> ComponentResult {
        Ok(())
    }

    /// Perform one unit of work
    fn step(&mut self) -> ComponentResult {
        Ok(())
    }

    /// Release resources acquired by `acquire_non_critical`
    fn release_non_critical(&mut self) -> ComponentResult {
        Ok(())
    }

    /// Release resources acquired by `acquire_critical`
    fn release_critical(&mut self) -> ComponentResult {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl ManagedComponent for Noop {}

    #[test]
    fn test_default_operations_succeed() {
        let mut component = Noop;

        assert!(component.acquire_critical().is_ok());
        assert!(component.acquire_non_critical().is_ok());
        assert!(component.step().is_ok());
        assert!(component.release_non_critical().is_ok());
        assert!(component.release_critical().is_ok());
    }

    #[test]
    fn test_default_name_is_type_name() {
        let component = Noop;
        assert!(component.name().ends_with("Noop"));
    }
}
