//! credkit
//!
//! Credential provisioning for integration test suites, with support for:
//! - Isolated tenants (a dedicated project and user per test group)
//! - Pre-provisioned account pools, with or without mutual exclusion
//! - An admin-availability check for suite-level skip decisions

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Credential, CredentialProvider, CredentialRole, DomainError, NetworkResources,
};
pub use infrastructure::credentials::{
    get_configured_credentials, is_admin_available, CredentialProviderFactory,
};
pub use infrastructure::logging::init_logging;
