//! Credential domain types

mod credential;
mod provider;

pub use credential::{Credential, CredentialRole, NetworkResources};
pub use provider::CredentialProvider;

#[cfg(test)]
pub use provider::mock;
