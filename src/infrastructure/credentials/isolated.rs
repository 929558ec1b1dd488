use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::{
    Credential, CredentialProvider, CredentialRole, DomainError, NetworkResources,
};
use crate::infrastructure::identity::IdentityService;

/// Provider that provisions a fresh, exclusively-owned project and user per
/// role through the identity service.
///
/// Accounts exist only for the lifetime of the test group and are deleted on
/// `release`. Generic over the identity client for mocking.
#[derive(Debug)]
pub struct IsolatedCredentialProvider<C: IdentityService> {
    test_group: String,
    client: C,
    network_resources: Option<NetworkResources>,
    provisioned: Mutex<HashMap<CredentialRole, Credential>>,
}

fn rand_suffix() -> String {
    format!("{:08x}", rand::random::<u32>())
}

fn rand_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

impl<C: IdentityService> IsolatedCredentialProvider<C> {
    pub fn new(
        client: C,
        test_group: impl Into<String>,
        network_resources: Option<NetworkResources>,
    ) -> Self {
        Self {
            test_group: test_group.into(),
            client,
            network_resources,
            provisioned: Mutex::new(HashMap::new()),
        }
    }

    /// Network resources requested for this test group. Passed through to the
    /// provisioning collaborators, never interpreted here.
    pub fn network_resources(&self) -> Option<&NetworkResources> {
        self.network_resources.as_ref()
    }

    async fn provision(&self, role: CredentialRole) -> Result<Credential, DomainError> {
        let suffix = rand_suffix();
        let project_name = format!("{}-{}-{}", self.test_group, role, suffix);
        let username = format!("{}-{}-user-{}", self.test_group, role, suffix);
        let password = rand_password();

        let project_id = self.client.create_project(&project_name).await?;

        let user_id = match self.client.create_user(&username, &password, &project_id).await {
            Ok(id) => id,
            Err(e) => {
                if let Err(cleanup) = self.client.delete_project(&project_id).await {
                    tracing::warn!(
                        project = %project_name,
                        error = %cleanup,
                        "Failed to clean up project after user creation failure"
                    );
                }
                return Err(e);
            }
        };

        if role == CredentialRole::Admin {
            if let Err(e) = self.client.assign_role(&user_id, &project_id, "admin").await {
                if let Err(cleanup) = self.client.delete_user(&user_id).await {
                    tracing::warn!(
                        project = %project_name,
                        error = %cleanup,
                        "Failed to clean up user after role assignment failure"
                    );
                }
                if let Err(cleanup) = self.client.delete_project(&project_id).await {
                    tracing::warn!(
                        project = %project_name,
                        error = %cleanup,
                        "Failed to clean up project after role assignment failure"
                    );
                }
                return Err(e);
            }
        }

        tracing::info!(
            test_group = %self.test_group,
            role = %role,
            project = %project_name,
            "Provisioned isolated credentials"
        );

        Ok(Credential::new(role, username, password, project_name)
            .with_user_id(user_id)
            .with_project_id(project_id))
    }
}

#[async_trait]
impl<C: IdentityService> CredentialProvider for IsolatedCredentialProvider<C> {
    async fn acquire(&self, role: CredentialRole) -> Result<Credential, DomainError> {
        let mut provisioned = self.provisioned.lock().await;

        if let Some(credential) = provisioned.get(&role) {
            return Ok(credential.clone());
        }

        let credential = self.provision(role).await?;
        provisioned.insert(role, credential.clone());
        Ok(credential)
    }

    async fn release(&self) -> Result<(), DomainError> {
        let mut provisioned = self.provisioned.lock().await;
        let mut failures = 0;

        for (role, credential) in provisioned.drain() {
            if let Some(user_id) = credential.user_id() {
                if let Err(e) = self.client.delete_user(user_id).await {
                    tracing::warn!(role = %role, error = %e, "Failed to delete isolated user");
                    failures += 1;
                }
            }

            if let Some(project_id) = credential.project_id() {
                if let Err(e) = self.client.delete_project(project_id).await {
                    tracing::warn!(role = %role, error = %e, "Failed to delete isolated project");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            return Err(DomainError::identity(format!(
                "{} isolated resources could not be deleted",
                failures
            )));
        }

        Ok(())
    }

    fn test_group(&self) -> &str {
        &self.test_group
    }

    fn provider_name(&self) -> &'static str {
        "isolated"
    }
}
