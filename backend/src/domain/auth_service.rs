//! Credential-based session login against the upstream auth service.

use async_trait::async_trait;
use shared::AuthSession;

use crate::domain::validation::Credentials;
use crate::error::DashboardError;
use crate::io::cms::client::CmsClient;

/// Seam between the login flow and whatever issues session credentials, so a
/// pluggable session-management subsystem can consume the exchange.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Exchange an identifier/password pair for a session credential.
    async fn authorize(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthSession, DashboardError>;
}

/// Provider backed by the upstream content API's auth endpoint.
#[derive(Clone)]
pub struct CmsCredentialProvider {
    cms: CmsClient,
}

impl CmsCredentialProvider {
    pub fn new(cms: CmsClient) -> Self {
        Self { cms }
    }
}

#[async_trait]
impl CredentialProvider for CmsCredentialProvider {
    async fn authorize(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthSession, DashboardError> {
        self.cms.authenticate(identifier, password).await
    }
}

/// Login flow: delegate to the provider and hand the session back. Cookie
/// persistence happens at the HTTP layer.
#[derive(Clone)]
pub struct AuthService<P = CmsCredentialProvider> {
    provider: P,
}

impl<P: CredentialProvider> AuthService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, DashboardError> {
        self.provider
            .authorize(&credentials.identifier, &credentials.password)
            .await
    }
}
