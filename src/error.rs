use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Invalid registration: {message}")]
    InvalidRegistration { message: String },

    #[error("Failed to register {signal} handler: {source}")]
    SignalRegistration {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl SupervisorError {
    pub fn invalid_registration<S: Into<String>>(message: S) -> Self {
        Self::InvalidRegistration {
            message: message.into(),
        }
    }
}

/// Failure reported by a managed component from one of its lifecycle operations
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("{message}")]
    Failed { message: String },
}

impl ComponentError {
    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        let err = SupervisorError::invalid_registration("component name must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid registration: component name must not be empty"
        );

        let err = ComponentError::failed("step budget of 5 exhausted");
        assert_eq!(err.to_string(), "step budget of 5 exhausted");
    }

    #[test]
    fn test_signal_registration_keeps_source() {
        let err = SupervisorError::SignalRegistration {
            signal: "SIGINT",
            source: std::io::Error::new(std::io::ErrorKind::Other, "no reactor"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to register SIGINT handler: no reactor"
        );
        assert!(err.source().is_some());
    }
}
