use super::ProviderAdapter;
use arena_application::{ChatGateway, GatewayError};
use arena_domain::{ConverseRequest, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Dispatches each call to the adapter registered for the requested provider.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    /// Providers whose API key cannot currently be resolved, with the
    /// environment variable that would supply it.
    pub fn missing_credentials(&self) -> Vec<(ProviderKind, String)> {
        self.providers
            .iter()
            .filter(|p| !p.credential().is_available())
            .map(|p| (p.kind(), p.credential().env_var().to_string()))
            .collect()
    }

    fn resolve_provider(&self, kind: ProviderKind) -> Result<&dyn ProviderAdapter, GatewayError> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
            .ok_or_else(|| GatewayError::ProviderUnavailable(kind.to_string()))
    }
}

#[async_trait]
impl ChatGateway for RoutingGateway {
    async fn converse(
        &self,
        provider: ProviderKind,
        request: &ConverseRequest,
    ) -> Result<String, GatewayError> {
        self.resolve_provider(provider)?.converse(request).await
    }

    fn model_name(&self, provider: ProviderKind) -> Option<String> {
        self.resolve_provider(provider)
            .ok()
            .map(|p| p.model().to_string())
    }
}
