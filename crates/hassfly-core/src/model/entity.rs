//! Entity-domain classification.
//!
//! An entity id is `domain.object_id`; the domain decides both which
//! service endpoint acts on it and whether it shows up as a controllable
//! device at all.

/// Domains that represent controllable/observable devices.
pub const DEVICE_DOMAINS: &[&str] = &[
    "light",
    "switch",
    "climate",
    "cover",
    "fan",
    "lock",
    "media_player",
    "script",
];

/// Whether `domain` is one of the controllable device domains.
pub fn is_device_domain(domain: &str) -> bool {
    DEVICE_DOMAINS.contains(&domain)
}
