use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not implemented: {message}")]
    NotImplemented { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Identity service error: {message}")]
    Identity { message: String },

    #[error("Account pool error: {message}")]
    Pool { message: String },
}

impl DomainError {
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    pub fn pool(message: impl Into<String>) -> Self {
        Self::Pool {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_error() {
        let error = DomainError::not_implemented("admin credentials cannot be synthesized");
        assert_eq!(
            error.to_string(),
            "Not implemented: admin credentials cannot be synthesized"
        );
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = DomainError::invalid_configuration("no admin username configured");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: no admin username configured"
        );
    }

    #[test]
    fn test_pool_error() {
        let error = DomainError::pool("no accounts left");
        assert_eq!(error.to_string(), "Account pool error: no accounts left");
    }
}
