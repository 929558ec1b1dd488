use async_trait::async_trait;
use std::fmt::Debug;

use super::{Credential, CredentialRole};
use crate::domain::DomainError;

/// Trait for test-group credential providers (isolated tenants, locked pools,
/// shared pre-provisioned accounts)
#[async_trait]
pub trait CredentialProvider: Send + Sync + Debug {
    /// Acquire credentials for the given role
    async fn acquire(&self, role: CredentialRole) -> Result<Credential, DomainError>;

    /// Release every account this provider acquired or created
    async fn release(&self) -> Result<(), DomainError>;

    /// Name of the test group this provider serves
    fn test_group(&self) -> &str;

    /// Provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug)]
    pub struct MockCredentialProvider {
        credentials: RwLock<HashMap<CredentialRole, Credential>>,
        test_group: String,
    }

    impl MockCredentialProvider {
        pub fn new(test_group: impl Into<String>) -> Self {
            Self {
                credentials: RwLock::new(HashMap::new()),
                test_group: test_group.into(),
            }
        }

        pub fn with_credential(self, cred: Credential) -> Self {
            self.credentials.write().unwrap().insert(cred.role(), cred);
            self
        }
    }

    #[async_trait]
    impl CredentialProvider for MockCredentialProvider {
        async fn acquire(&self, role: CredentialRole) -> Result<Credential, DomainError> {
            self.credentials
                .read()
                .unwrap()
                .get(&role)
                .cloned()
                .ok_or_else(|| {
                    DomainError::credential(format!("No credential staged for role: {}", role))
                })
        }

        async fn release(&self) -> Result<(), DomainError> {
            self.credentials.write().unwrap().clear();
            Ok(())
        }

        fn test_group(&self) -> &str {
            &self.test_group
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
