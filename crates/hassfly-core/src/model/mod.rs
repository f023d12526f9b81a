// ── Domain model ──
//
// Canonical types consumers (CLI) depend on. Entity state comes off the
// wire via hassfly-api; network identity comes out of the CLI parser.

pub mod entity;
pub mod network;

// ── Re-exports ──────────────────────────────────────────────────────

pub use entity::{DEVICE_DOMAINS, is_device_domain};
pub use hassfly_api::EntityState;
pub use network::{ConnectionRecord, CurrentConnection, HomeNetwork, WifiNetwork};
