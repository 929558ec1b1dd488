use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::get_configured_credentials;
use crate::config::AuthConfig;
use crate::domain::{Credential, CredentialProvider, CredentialRole, DomainError};

#[derive(Debug, Clone)]
struct PoolAccount {
    username: String,
    password: String,
    project: String,
}

/// Shared pool of pre-provisioned accounts.
///
/// Leases are tracked per account so that no two holders are handed the same
/// account while a lease is outstanding.
#[derive(Debug)]
pub struct AccountPool {
    accounts: Vec<PoolAccount>,
    leased: Mutex<HashSet<usize>>,
}

impl AccountPool {
    /// Build a pool from the configured `test_accounts`. Entries with missing
    /// fields are skipped.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let accounts = auth
            .test_accounts
            .iter()
            .filter_map(|entry| match (&entry.username, &entry.password, &entry.project) {
                (Some(username), Some(password), Some(project)) => Some(PoolAccount {
                    username: username.clone(),
                    password: password.clone(),
                    project: project.clone(),
                }),
                _ => {
                    tracing::warn!("Skipping incomplete pre-provisioned account entry");
                    None
                }
            })
            .collect();

        Self {
            accounts,
            leased: Mutex::new(HashSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn lease(&self) -> Result<(usize, PoolAccount), DomainError> {
        let mut leased = self.leased.lock().unwrap();

        for (index, account) in self.accounts.iter().enumerate() {
            if !leased.contains(&index) {
                leased.insert(index);
                return Ok((index, account.clone()));
            }
        }

        Err(DomainError::pool(format!(
            "all {} pre-provisioned accounts are leased",
            self.accounts.len()
        )))
    }

    fn release(&self, index: usize) {
        self.leased.lock().unwrap().remove(&index);
    }
}

/// Provider drawing accounts from a shared pool with mutual exclusion.
///
/// An account stays leased to this provider until `release`, so concurrent
/// test groups never hold the same account.
#[derive(Debug)]
pub struct LockingAccountsProvider {
    test_group: String,
    pool: Arc<AccountPool>,
    leases: Mutex<HashMap<CredentialRole, (usize, Credential)>>,
}

impl LockingAccountsProvider {
    pub fn new(test_group: impl Into<String>, pool: Arc<AccountPool>) -> Self {
        Self {
            test_group: test_group.into(),
            pool,
            leases: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CredentialProvider for LockingAccountsProvider {
    async fn acquire(&self, role: CredentialRole) -> Result<Credential, DomainError> {
        if role == CredentialRole::Admin {
            return Err(DomainError::not_implemented(
                "pre-provisioned pools do not include admin-capable accounts",
            ));
        }

        let mut leases = self.leases.lock().unwrap();

        if let Some((_, credential)) = leases.get(&role) {
            return Ok(credential.clone());
        }

        let (index, account) = self.pool.lease()?;
        let credential = Credential::new(role, account.username, account.password, account.project);

        tracing::debug!(
            test_group = %self.test_group,
            role = %role,
            username = credential.username(),
            "Leased pre-provisioned account"
        );

        leases.insert(role, (index, credential.clone()));
        Ok(credential)
    }

    async fn release(&self) -> Result<(), DomainError> {
        let mut leases = self.leases.lock().unwrap();

        for (role, (index, _)) in leases.drain() {
            tracing::debug!(
                test_group = %self.test_group,
                role = %role,
                "Returned account to pool"
            );
            self.pool.release(index);
        }

        Ok(())
    }

    fn test_group(&self) -> &str {
        &self.test_group
    }

    fn provider_name(&self) -> &'static str {
        "locking_accounts"
    }
}

/// Provider handing out statically configured accounts without exclusion.
///
/// Callers accept that concurrent test groups may reuse the same account.
#[derive(Debug)]
pub struct NotLockingAccountsProvider {
    test_group: String,
    auth: AuthConfig,
}

impl NotLockingAccountsProvider {
    pub fn new(test_group: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            test_group: test_group.into(),
            auth,
        }
    }
}

#[async_trait]
impl CredentialProvider for NotLockingAccountsProvider {
    async fn acquire(&self, role: CredentialRole) -> Result<Credential, DomainError> {
        let credential = get_configured_credentials(&self.auth, role)?;

        tracing::debug!(
            test_group = %self.test_group,
            role = %role,
            username = credential.username(),
            "Using shared configured account"
        );

        Ok(credential)
    }

    async fn release(&self) -> Result<(), DomainError> {
        // Nothing is held exclusively.
        Ok(())
    }

    fn test_group(&self) -> &str {
        &self.test_group
    }

    fn provider_name(&self) -> &'static str {
        "not_locking_accounts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfiguredAccount;

    fn auth_with_pool(count: usize) -> AuthConfig {
        AuthConfig {
            locking_credentials_provider: true,
            test_accounts: (0..count)
                .map(|i| ConfiguredAccount::new(format!("user{}", i), "pw", format!("proj{}", i)))
                .collect(),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_concurrent_groups_get_distinct_accounts() {
        let pool = Arc::new(AccountPool::from_config(&auth_with_pool(2)));
        let first = LockingAccountsProvider::new("group-a", pool.clone());
        let second = LockingAccountsProvider::new("group-b", pool);

        let a = first.acquire(CredentialRole::Primary).await.unwrap();
        let b = second.acquire(CredentialRole::Primary).await.unwrap();

        assert_ne!(a.username(), b.username());
    }

    #[tokio::test]
    async fn test_acquire_is_idempotent_per_role() {
        let pool = Arc::new(AccountPool::from_config(&auth_with_pool(2)));
        let provider = LockingAccountsProvider::new("group", pool);

        let a = provider.acquire(CredentialRole::Primary).await.unwrap();
        let b = provider.acquire(CredentialRole::Primary).await.unwrap();

        assert_eq!(a.username(), b.username());
    }

    #[tokio::test]
    async fn test_pool_exhaustion() {
        let pool = Arc::new(AccountPool::from_config(&auth_with_pool(1)));
        let provider = LockingAccountsProvider::new("group", pool);

        provider.acquire(CredentialRole::Primary).await.unwrap();
        let result = provider.acquire(CredentialRole::Alt).await;

        assert!(matches!(result, Err(DomainError::Pool { .. })));
    }

    #[tokio::test]
    async fn test_release_returns_accounts_to_pool() {
        let pool = Arc::new(AccountPool::from_config(&auth_with_pool(1)));
        let first = LockingAccountsProvider::new("group-a", pool.clone());
        let second = LockingAccountsProvider::new("group-b", pool);

        first.acquire(CredentialRole::Primary).await.unwrap();
        first.release().await.unwrap();

        second.acquire(CredentialRole::Primary).await.unwrap();
    }

    #[tokio::test]
    async fn test_locking_provider_refuses_admin() {
        let pool = Arc::new(AccountPool::from_config(&auth_with_pool(1)));
        let provider = LockingAccountsProvider::new("group", pool);

        let result = provider.acquire(CredentialRole::Admin).await;
        assert!(matches!(result, Err(DomainError::NotImplemented { .. })));
    }

    #[tokio::test]
    async fn test_incomplete_pool_entries_are_skipped() {
        let mut auth = auth_with_pool(1);
        auth.test_accounts.push(ConfiguredAccount {
            username: Some("dangling".to_string()),
            password: None,
            project: None,
        });

        let pool = AccountPool::from_config(&auth);
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn test_not_locking_provider_uses_configured_account() {
        let auth = AuthConfig {
            primary: ConfiguredAccount::new("alice", "pw", "demo"),
            ..AuthConfig::default()
        };
        let provider = NotLockingAccountsProvider::new("group", auth);

        let cred = provider.acquire(CredentialRole::Primary).await.unwrap();
        assert_eq!(cred.username(), "alice");
        provider.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_not_locking_provider_without_admin_config() {
        let provider = NotLockingAccountsProvider::new("group", AuthConfig::default());

        let result = provider.acquire(CredentialRole::Admin).await;
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }
}
