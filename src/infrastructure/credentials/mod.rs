//! Credential provider implementations

mod accounts;
mod configured;
mod factory;
mod isolated;

pub use accounts::{AccountPool, LockingAccountsProvider, NotLockingAccountsProvider};
pub use configured::get_configured_credentials;
pub use factory::{is_admin_available, CredentialProviderFactory};
pub use isolated::IsolatedCredentialProvider;
