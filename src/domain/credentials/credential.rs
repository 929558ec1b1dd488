use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a credential plays within one test group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialRole {
    /// Main account the test group runs as
    Primary,
    /// Second, distinct account for cross-account checks
    Alt,
    /// Elevated account for privileged setup/teardown
    Admin,
}

impl std::fmt::Display for CredentialRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialRole::Primary => write!(f, "primary"),
            CredentialRole::Alt => write!(f, "alt"),
            CredentialRole::Admin => write!(f, "admin"),
        }
    }
}

/// Network resources requested alongside an isolated tenant.
///
/// Opaque to provider selection; the provisioning collaborators interpret it
/// when the tenant is actually created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResources {
    pub network: bool,
    pub router: bool,
    pub subnet: bool,
    pub dhcp: bool,
}

impl Default for NetworkResources {
    fn default() -> Self {
        Self {
            network: true,
            router: true,
            subnet: true,
            dhcp: true,
        }
    }
}

/// A set of account credentials usable against the platform under test
#[derive(Debug, Clone)]
pub struct Credential {
    role: CredentialRole,
    username: String,
    password: String,
    project: String,
    user_id: Option<String>,
    project_id: Option<String>,
    fetched_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        role: CredentialRole,
        username: impl Into<String>,
        password: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            role,
            username: username.into(),
            password: password.into(),
            project: project.into(),
            user_id: None,
            project_id: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn role(&self) -> CredentialRole {
        self.role
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
