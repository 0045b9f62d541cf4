//! Identity providers that connect a wallet to the session.
//!
//! The hosted provider (a third-party wallet login SDK) lives in the embedding
//! application and is handed in as a trait object. Without an application key
//! the session falls back to [`OfflineIdentity`], which behaves the same from
//! the session's point of view.

use async_trait::async_trait;
use market_core::config::Config;
use market_core::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Demo wallet address used when no identity provider is configured.
pub const OFFLINE_ADDRESS: &str = "0x742d35Cc6Ba1f23e8976543dcF1234567890abcd";

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// First linked wallet, if the user has one.
    pub address: Option<String>,
}

impl Identity {
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
        }
    }
}

/// External authentication flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the login flow.
    async fn login(&self) -> Result<Identity>;

    /// End the provider session.
    fn logout(&self);

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Provider that "logs in" instantly with a fixed demo address.
#[derive(Debug, Clone)]
pub struct OfflineIdentity {
    address: String,
}

impl OfflineIdentity {
    pub fn new() -> Self {
        Self {
            address: OFFLINE_ADDRESS.to_string(),
        }
    }

    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Default for OfflineIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for OfflineIdentity {
    async fn login(&self) -> Result<Identity> {
        Ok(Identity::with_address(self.address.clone()))
    }

    fn logout(&self) {}

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Pick the provider for a session.
///
/// The hosted provider is used only when an application key is configured
/// and the caller supplied one; every other combination gets the offline
/// provider.
pub fn select_provider(
    config: &Config,
    hosted: Option<Arc<dyn IdentityProvider>>,
) -> Arc<dyn IdentityProvider> {
    match (config.use_hosted_identity(), hosted) {
        (true, Some(provider)) => {
            info!(provider = provider.name(), "Using hosted identity provider");
            provider
        }
        (true, None) => {
            warn!(
                "Identity app key configured but no hosted provider supplied, using offline wallet"
            );
            Arc::new(OfflineIdentity::new())
        }
        (false, _) => {
            info!("No identity app key configured, using offline wallet");
            Arc::new(OfflineIdentity::new())
        }
    }
}
