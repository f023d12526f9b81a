//! Wire types for the Home Assistant REST API.
//!
//! Field names match the JSON exactly (the API already uses snake_case).
//! Attribute maps are kept as opaque `serde_json` values -- the set of
//! attributes varies per integration and is not modeled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Entity states ────────────────────────────────────────────────────

/// One entity's current state -- from `GET /api/states` (as an array
/// element) or `GET /api/states/{entity_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// `domain.object_id`, e.g. `light.kitchen`.
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub last_changed: DateTime<Utc>,
    /// Absent in some service-call change records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl EntityState {
    /// The domain prefix of the entity id (`light` for `light.kitchen`).
    ///
    /// Always derived, never stored: the id is the single source of truth.
    pub fn domain(&self) -> &str {
        self.entity_id.split('.').next().unwrap_or_default()
    }

    /// The `friendly_name` attribute, if the integration provides one.
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes.get("friendly_name").and_then(Value::as_str)
    }

    /// Whether the backing device is currently reachable.
    pub fn is_available(&self) -> bool {
        self.state != "unavailable"
    }
}

// ── Service calls ────────────────────────────────────────────────────

/// Body for `POST /api/services/{domain}/{service}`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCallBody {
    pub entity_id: String,
}

/// Response to a service call. The server returns one of two shapes:
/// a bare array of changed-entity records, or an object wrapping the
/// array together with an optional `service_response`. Both pass
/// through undisturbed; use [`ServiceCallResponse::changed_states`]
/// when only the state changes matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceCallResponse {
    Changed(Vec<EntityState>),
    WithServiceResponse {
        changed_states: Vec<EntityState>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        service_response: Option<Value>,
    },
}

impl ServiceCallResponse {
    /// The changed-entity records, regardless of wire shape.
    pub fn changed_states(&self) -> &[EntityState] {
        match self {
            Self::Changed(states) => states,
            Self::WithServiceResponse { changed_states, .. } => changed_states,
        }
    }

    /// The `service_response` payload, when the wrapping shape carried one.
    pub fn service_response(&self) -> Option<&Value> {
        match self {
            Self::Changed(_) => None,
            Self::WithServiceResponse {
                service_response, ..
            } => service_response.as_ref(),
        }
    }
}

// ── Templates ────────────────────────────────────────────────────────

/// Body for `POST /api/template`. The response is the rendered text,
/// not JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

// ── Error bodies ─────────────────────────────────────────────────────

/// Shape of Home Assistant's error responses, e.g. `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_is_derived_from_entity_id() {
        let state: EntityState = serde_json::from_value(json!({
            "entity_id": "light.kitchen",
            "state": "on",
            "attributes": {"friendly_name": "Kitchen"},
            "last_changed": "2025-05-01T10:00:00+00:00",
        }))
        .expect("valid entity state");

        assert_eq!(state.domain(), "light");
        assert_eq!(state.friendly_name(), Some("Kitchen"));
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn service_response_both_shapes_deserialize() {
        let bare: ServiceCallResponse = serde_json::from_value(json!([
            {
                "entity_id": "light.kitchen",
                "state": "on",
                "attributes": {},
                "last_changed": "2025-05-01T10:00:00+00:00",
            }
        ]))
        .expect("bare array shape");
        assert_eq!(bare.changed_states().len(), 1);
        assert!(bare.service_response().is_none());

        let wrapped: ServiceCallResponse = serde_json::from_value(json!({
            "changed_states": [],
            "service_response": {"ok": true},
        }))
        .expect("wrapped shape");
        assert!(wrapped.changed_states().is_empty());
        assert_eq!(wrapped.service_response(), Some(&json!({"ok": true})));
    }
}
