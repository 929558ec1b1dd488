use crate::config::AuthConfig;
use crate::domain::{Credential, CredentialRole, DomainError};

/// Resolve credentials for a role straight from configuration.
///
/// Fails with `NotImplemented` when the locking pool provider is the one in
/// use and admin credentials are requested: pool accounts are pre-created and
/// admin accounts cannot be synthesized on demand. Fails with
/// `InvalidConfiguration` when any field of the role's account is missing.
pub fn get_configured_credentials(
    auth: &AuthConfig,
    role: CredentialRole,
) -> Result<Credential, DomainError> {
    if role == CredentialRole::Admin
        && auth.locking_credentials_provider
        && !auth.allow_tenant_isolation
    {
        return Err(DomainError::not_implemented(
            "the locking accounts provider cannot supply admin credentials",
        ));
    }

    let account = match role {
        CredentialRole::Primary => &auth.primary,
        CredentialRole::Alt => &auth.alt,
        CredentialRole::Admin => &auth.admin,
    };

    let username = account.username.clone().ok_or_else(|| {
        DomainError::invalid_configuration(format!("no {} username configured", role))
    })?;
    let password = account.password.clone().ok_or_else(|| {
        DomainError::invalid_configuration(format!("no {} password configured", role))
    })?;
    let project = account.project.clone().ok_or_else(|| {
        DomainError::invalid_configuration(format!("no {} project configured", role))
    })?;

    Ok(Credential::new(role, username, password, project))
}
