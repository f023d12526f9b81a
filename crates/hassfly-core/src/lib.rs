// hassfly-core: Domain layer between hassfly-api and consumers (CLI).
//
// Owns the only real state machinery in the system: probing the OS
// network manager, deciding which base URL reaches the Home Assistant
// server, and running entity operations through the resulting client.

pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod resolver;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ServerConfig;
pub use error::CoreError;
pub use net::backend::{NetworkBackend, NetworkTool, backend_for};
pub use net::nmcli::NmcliBackend;
pub use resolver::{EndpointResolver, ResolvedEndpoint, resolve_base_url};
pub use session::Session;
pub use store::EntityCache;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ConnectionRecord, CurrentConnection, DEVICE_DOMAINS, EntityState, HomeNetwork, WifiNetwork,
    is_device_domain,
};
