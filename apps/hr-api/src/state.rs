//! Application state shared across all request handlers.
//!
//! Every collaborator is held behind its trait object so the full router
//! can be exercised in tests with in-memory fakes; nothing reaches into
//! ambient global state.

use std::sync::Arc;

use kadro_db::{RoleStore, TenantDirectory, UserStore};
use kadro_provisioning::ProvisioningEngine;
use kadro_webhook::WebhookVerifier;

/// Application state shared across all handlers.
///
/// Cloned per request; the inner resources are reference counted so
/// cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Organization existence/liveness lookups.
    pub directory: Arc<dyn TenantDirectory>,

    /// User persistence.
    pub users: Arc<dyn UserStore>,

    /// Role persistence.
    pub roles: Arc<dyn RoleStore>,

    /// The provisioning engine driving webhook events.
    pub engine: Arc<ProvisioningEngine>,

    /// Webhook signature verifier.
    pub verifier: WebhookVerifier,

    /// Symmetric secret for session credential signing.
    pub session_secret: Arc<Vec<u8>>,

    /// PEM-encoded public key of the identity provider.
    pub provider_public_key: Arc<Vec<u8>>,

    /// Application version from Cargo.toml.
    pub version: &'static str,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        directory: Arc<dyn TenantDirectory>,
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        engine: Arc<ProvisioningEngine>,
        verifier: WebhookVerifier,
        session_secret: impl Into<Vec<u8>>,
        provider_public_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            directory,
            users,
            roles,
            engine,
            verifier,
            session_secret: Arc::new(session_secret.into()),
            provider_public_key: Arc::new(provider_public_key.into()),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
