//! Domain layer - Core types and provider contracts

pub mod credentials;
pub mod error;

pub use credentials::{Credential, CredentialProvider, CredentialRole, NetworkResources};
pub use error::DomainError;
