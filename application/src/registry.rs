//! Generator registry
//!
//! Provider id to generator mapping, built once at process start.

use crate::ports::generator::Generator;
use council_domain::ProviderId;
use serde::Serialize;
use std::sync::Arc;

/// Readiness of one registered provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderReadiness {
    pub provider: ProviderId,
    pub ready: bool,
    pub local: bool,
}

/// Registered generators, in registration order
#[derive(Default, Clone)]
pub struct GeneratorRegistry {
    generators: Vec<Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator, replacing any previous one for the same provider.
    pub fn register(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generators
            .retain(|existing| existing.provider() != generator.provider());
        self.generators.push(generator);
        self
    }

    pub fn get(&self, provider: &ProviderId) -> Option<Arc<dyn Generator>> {
        self.generators
            .iter()
            .find(|g| g.provider() == provider)
            .cloned()
    }

    /// Registered and ready.
    pub fn is_usable(&self, provider: &ProviderId) -> bool {
        self.get(provider).is_some_and(|g| g.is_ready())
    }

    pub fn readiness(&self) -> Vec<ProviderReadiness> {
        self.generators
            .iter()
            .map(|g| ProviderReadiness {
                provider: g.provider().clone(),
                ready: g.is_ready(),
                local: g.provider().is_local(),
            })
            .collect()
    }

    pub fn ready_count(&self) -> usize {
        self.generators.iter().filter(|g| g.is_ready()).count()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.generators.iter().map(|g| g.provider().as_str()))
            .finish()
    }
}
