// ── Entity cache ──
//
// Holds the most recently fetched state list for one session. Writes
// are last-write-wins: a full refresh replaces the list wholesale and a
// patch swaps a single record; concurrent writers never merge.

use tokio::sync::RwLock;

use crate::model::EntityState;

/// Session-local cache of entity states.
#[derive(Debug, Default)]
pub struct EntityCache {
    states: RwLock<Vec<EntityState>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire list with a fresh fetch.
    pub async fn replace_all(&self, states: Vec<EntityState>) {
        *self.states.write().await = states;
    }

    /// Replace the record with the same entity id, or append when the
    /// entity was not cached yet.
    pub async fn patch(&self, updated: EntityState) {
        let mut states = self.states.write().await;
        match states.iter_mut().find(|s| s.entity_id == updated.entity_id) {
            Some(slot) => *slot = updated,
            None => states.push(updated),
        }
    }

    /// A point-in-time copy of the cached list.
    pub async fn snapshot(&self) -> Vec<EntityState> {
        self.states.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: &str, state: &str) -> EntityState {
        serde_json::from_value(serde_json::json!({
            "entity_id": id,
            "state": state,
            "attributes": {},
            "last_changed": "2025-05-01T10:00:00+00:00",
        }))
        .expect("valid entity state")
    }

    #[tokio::test]
    async fn replace_all_is_last_write_wins() {
        let cache = EntityCache::new();
        cache
            .replace_all(vec![state("light.kitchen", "on"), state("switch.fan", "off")])
            .await;
        cache.replace_all(vec![state("light.kitchen", "off")]).await;

        let snap = cache.snapshot().await;
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].state, "off");
    }

    #[tokio::test]
    async fn patch_swaps_one_record_in_place() {
        let cache = EntityCache::new();
        cache
            .replace_all(vec![state("light.kitchen", "on"), state("switch.fan", "off")])
            .await;
        cache.patch(state("switch.fan", "on")).await;

        let snap = cache.snapshot().await;
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[1].entity_id, "switch.fan");
        assert_eq!(snap[1].state, "on");

        cache.patch(state("lock.door", "locked")).await;
        assert_eq!(cache.len().await, 3);
    }
}
