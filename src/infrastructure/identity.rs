use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::IdentityConfig;
use crate::domain::DomainError;

/// Trait for identity service operations (for mocking)
#[async_trait]
pub trait IdentityService: Send + Sync + std::fmt::Debug {
    /// Create a project and return its id
    async fn create_project(&self, name: &str) -> Result<String, DomainError>;

    /// Create a user scoped to a project and return its id
    async fn create_user(
        &self,
        name: &str,
        password: &str,
        project_id: &str,
    ) -> Result<String, DomainError>;

    /// Grant a named role to a user on a project
    async fn assign_role(
        &self,
        user_id: &str,
        project_id: &str,
        role: &str,
    ) -> Result<(), DomainError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError>;

    async fn delete_project(&self, project_id: &str) -> Result<(), DomainError>;
}

/// Real identity HTTP client
#[derive(Debug)]
pub struct HttpIdentityClient {
    config: IdentityConfig,
    http_client: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DomainError> {
        let response = request
            .header("X-Auth-Token", &self.config.service_token)
            .send()
            .await
            .map_err(|e| DomainError::identity(format!("Identity request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::identity(format!(
                "Identity service returned error status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[derive(Deserialize)]
struct ProjectResponse {
    project: ResourceRef,
}

#[derive(Deserialize)]
struct UserResponse {
    user: ResourceRef,
}

#[derive(Deserialize)]
struct ResourceRef {
    id: String,
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn create_project(&self, name: &str) -> Result<String, DomainError> {
        let url = format!("{}/v3/projects", self.config.endpoint);
        let body = json!({ "project": { "name": name } });

        let response = self.send(self.http_client.post(&url).json(&body)).await?;

        let parsed: ProjectResponse = response.json().await.map_err(|e| {
            DomainError::identity(format!("Failed to parse project response: {}", e))
        })?;

        Ok(parsed.project.id)
    }

    async fn create_user(
        &self,
        name: &str,
        password: &str,
        project_id: &str,
    ) -> Result<String, DomainError> {
        let url = format!("{}/v3/users", self.config.endpoint);
        let body = json!({
            "user": {
                "name": name,
                "password": password,
                "project_id": project_id,
            }
        });

        let response = self.send(self.http_client.post(&url).json(&body)).await?;

        let parsed: UserResponse = response
            .json()
            .await
            .map_err(|e| DomainError::identity(format!("Failed to parse user response: {}", e)))?;

        Ok(parsed.user.id)
    }

    async fn assign_role(
        &self,
        user_id: &str,
        project_id: &str,
        role: &str,
    ) -> Result<(), DomainError> {
        let url = format!(
            "{}/v3/projects/{}/users/{}/roles/{}",
            self.config.endpoint, project_id, user_id, role
        );

        self.send(self.http_client.put(&url)).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        let url = format!("{}/v3/users/{}", self.config.endpoint, user_id);

        self.send(self.http_client.delete(&url)).await?;
        Ok(())
    }

    async fn delete_project(&self, project_id: &str) -> Result<(), DomainError> {
        let url = format!("{}/v3/projects/{}", self.config.endpoint, project_id);

        self.send(self.http_client.delete(&url)).await?;
        Ok(())
    }
}
