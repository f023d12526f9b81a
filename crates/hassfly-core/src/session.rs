//! One resolved connection to Home Assistant.
//!
//! `Session::connect` runs the probe → resolve → construct chain once;
//! every entity operation afterwards goes through the resulting client.
//! There is no retry anywhere in this chain -- a failed action surfaces
//! once and the caller re-triggers it.

use hassfly_api::transport::TlsMode;
use hassfly_api::{HaClient, TransportConfig};
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::model::{EntityState, HomeNetwork, is_device_domain};
use crate::net::backend::NetworkBackend;
use crate::resolver::{EndpointResolver, ResolvedEndpoint};
use crate::store::EntityCache;

/// A connected session: resolved endpoint, API client, entity cache.
#[derive(Debug)]
pub struct Session {
    client: HaClient,
    endpoint: ResolvedEndpoint,
    cache: EntityCache,
}

impl Session {
    /// Resolve the endpoint against current network state and construct
    /// the API client.
    ///
    /// Resolution is done fresh on every connect -- endpoint choices are
    /// never reused across sessions, since the machine may have moved
    /// networks in between.
    pub async fn connect(
        config: &ServerConfig,
        home: &HomeNetwork,
        backend: &dyn NetworkBackend,
    ) -> Result<Self, CoreError> {
        let endpoint = EndpointResolver::new(backend)
            .resolve(&config.url, home)
            .await;
        debug!(
            base_url = %endpoint.base_url,
            via_home_network = endpoint.via_home_network,
            "resolved endpoint"
        );

        let transport = TransportConfig {
            tls: if config.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: config.timeout,
        };
        let client = HaClient::new(&endpoint.base_url, &config.token, &transport)?;

        Ok(Self {
            client,
            endpoint,
            cache: EntityCache::new(),
        })
    }

    /// The endpoint this session resolved to.
    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    /// Fetch all entity states, replacing the cache, and return them.
    pub async fn refresh(&self) -> Result<Vec<EntityState>, CoreError> {
        let resp = self.client.get_states().await?;
        self.cache.replace_all(resp.payload.clone()).await;
        Ok(resp.payload)
    }

    /// Cached states filtered to available, controllable devices.
    pub async fn device_entities(&self) -> Vec<EntityState> {
        self.cache
            .snapshot()
            .await
            .into_iter()
            .filter(|s| is_device_domain(s.domain()) && s.is_available())
            .collect()
    }

    /// One entity's current state, straight from the server.
    pub async fn entity(&self, entity_id: &str) -> Result<EntityState, CoreError> {
        match self.client.get_state(entity_id).await {
            Ok(resp) => Ok(resp.payload),
            Err(hassfly_api::Error::Api { status: 404, .. }) => Err(CoreError::EntityNotFound {
                entity_id: entity_id.to_owned(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Toggle an entity via its domain's `toggle` service, then refetch
    /// it and patch the cache so the caller sees the settled state.
    pub async fn toggle(&self, entity_id: &str) -> Result<EntityState, CoreError> {
        let domain = entity_id.split('.').next().unwrap_or_default();
        self.client
            .call_service(domain, "toggle", entity_id)
            .await?;

        let updated = self.entity(entity_id).await?;
        self.cache.patch(updated.clone()).await;
        Ok(updated)
    }

    /// Render a Jinja template server-side.
    pub async fn render_template(&self, template: &str) -> Result<String, CoreError> {
        Ok(self.client.render_template(template).await?.payload)
    }
}
