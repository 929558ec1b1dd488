use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credential provisioning settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Provision a dedicated project and user per test group
    #[serde(default)]
    pub allow_tenant_isolation: bool,

    /// Draw pre-provisioned accounts with mutual exclusion
    #[serde(default)]
    pub locking_credentials_provider: bool,

    /// Statically configured accounts, by role
    #[serde(default)]
    pub primary: ConfiguredAccount,
    #[serde(default)]
    pub alt: ConfiguredAccount,
    #[serde(default)]
    pub admin: ConfiguredAccount,

    /// Shared pool of pre-created accounts for the pool-backed providers
    #[serde(default)]
    pub test_accounts: Vec<ConfiguredAccount>,
}

/// One account as it appears in configuration. Fields are individually
/// optional; resolution decides whether an incomplete account is usable.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfiguredAccount {
    pub username: Option<String>,
    pub password: Option<String>,
    pub project: Option<String>,
}

impl ConfiguredAccount {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            project: Some(project.into()),
        }
    }
}

/// Connection settings for the external identity service
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub service_token: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            service_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("CREDKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(!config.auth.allow_tenant_isolation);
        assert!(!config.auth.locking_credentials_provider);
        assert!(config.auth.test_accounts.is_empty());
        assert_eq!(config.identity.endpoint, "http://localhost:5000");
    }

    #[test]
    fn test_configured_account_builder() {
        let account = ConfiguredAccount::new("alice", "s3cret", "demo");

        assert_eq!(account.username.as_deref(), Some("alice"));
        assert_eq!(account.password.as_deref(), Some("s3cret"));
        assert_eq!(account.project.as_deref(), Some("demo"));
    }
}
