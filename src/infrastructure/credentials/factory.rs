use std::sync::Arc;

use super::{
    get_configured_credentials, AccountPool, IsolatedCredentialProvider, LockingAccountsProvider,
    NotLockingAccountsProvider,
};
use crate::config::AppConfig;
use crate::domain::{CredentialProvider, CredentialRole, DomainError, NetworkResources};
use crate::infrastructure::identity::HttpIdentityClient;

/// Factory selecting the credential-provisioning strategy for each test group.
///
/// Built once per suite run so that pool-backed providers share a single
/// account pool across test groups.
#[derive(Debug)]
pub struct CredentialProviderFactory {
    config: AppConfig,
    pool: Arc<AccountPool>,
}

impl CredentialProviderFactory {
    pub fn new(config: AppConfig) -> Self {
        let pool = Arc::new(AccountPool::from_config(&config.auth));
        Self { config, pool }
    }

    /// Select and construct the provider for one test group.
    ///
    /// Selection is total over the configuration flags, evaluated in order:
    /// tenant isolation (configured or forced per call), then the locking
    /// pool, then shared configured accounts. A test that needs a fresh
    /// account can force tenant isolation for itself alone; if admin
    /// credentials are unavailable for the account creation the test should
    /// be skipped rather than fail.
    pub fn create(
        &self,
        name: &str,
        network_resources: Option<NetworkResources>,
        force_tenant_isolation: bool,
    ) -> Arc<dyn CredentialProvider> {
        if self.config.auth.allow_tenant_isolation || force_tenant_isolation {
            let client = HttpIdentityClient::new(self.config.identity.clone());
            return Arc::new(IsolatedCredentialProvider::new(
                client,
                name,
                network_resources,
            ));
        }

        if self.config.auth.locking_credentials_provider {
            return Arc::new(LockingAccountsProvider::new(name, self.pool.clone()));
        }

        Arc::new(NotLockingAccountsProvider::new(
            name,
            self.config.auth.clone(),
        ))
    }
}

/// Whether admin-level credentials can be obtained under this configuration,
/// without performing any privileged call.
///
/// Lets suite setup decide in one place whether admin-dependent tests must
/// be skipped.
pub fn is_admin_available(config: &AppConfig) -> bool {
    // Pre-provisioned pools are assumed not to include admin-capable accounts.
    if config.auth.locking_credentials_provider && !config.auth.allow_tenant_isolation {
        return false;
    }

    match get_configured_credentials(&config.auth, CredentialRole::Admin) {
        Err(DomainError::NotImplemented { .. }) | Err(DomainError::InvalidConfiguration { .. }) => {
            false
        }
        _ => true,
    }
}
