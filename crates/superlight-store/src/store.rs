//! The per-light set of active requests

use indexmap::IndexMap;
use tracing::trace;

use crate::Request;

/// The set of active state requests for one light, keyed by requester id
///
/// Map insertion order doubles as push recency: `put` re-inserts at the
/// back, so among equal priorities the most recently pushed entry is the
/// later one. The arbiter relies on this for its deterministic tie-break.
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    requests: IndexMap<String, Request>,
}

impl RequestStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a request by id, refreshing its recency
    pub fn put(&mut self, request: Request) {
        trace!(id = %request.id, priority = request.priority, "Recording request");
        self.requests.shift_remove(&request.id);
        self.requests.insert(request.id.clone(), request);
    }

    /// Remove a request by id; absent ids are a no-op
    pub fn remove(&mut self, id: &str) -> bool {
        let found = self.requests.shift_remove(id).is_some();
        trace!(id = %id, found, "Removing request");
        found
    }

    /// Get a request by id
    pub fn get(&self, id: &str) -> Option<&Request> {
        self.requests.get(id)
    }

    /// Whether the store holds no requests
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Number of active requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// The winning request: highest priority, most recent push on ties
    pub fn winner(&self) -> Option<&Request> {
        let mut best: Option<&Request> = None;
        for request in self.requests.values() {
            // >= so a later entry of equal priority displaces the earlier one
            if best.map_or(true, |b| request.priority >= b.priority) {
                best = Some(request);
            }
        }
        best
    }

    /// All requests in arbitration order: priority descending, most recent
    /// push first among equals
    pub fn snapshot(&self) -> Vec<Request> {
        let mut ordered: Vec<Request> = self.requests.values().cloned().collect();
        // Entries are in push order; reversing makes the stable sort put the
        // most recent push first within each priority.
        ordered.reverse();
        ordered.sort_by_key(|r| std::cmp::Reverse(r.priority));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superlight_core::AttributeSet;

    fn req(id: &str, priority: i64, on: bool) -> Request {
        Request::new(id, priority, on, AttributeSet::new()).unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let mut store = RequestStore::new();
        store.put(req("auto1", 10, true));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("auto1").unwrap().priority, 10);
        assert!(store.get("auto2").is_none());
    }

    #[test]
    fn test_put_same_id_replaces() {
        let mut store = RequestStore::new();
        store.put(req("auto1", 10, true));
        store.put(req("auto1", 20, false));
        store.put(req("auto1", 30, true));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("auto1").unwrap().priority, 30);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = RequestStore::new();
        store.put(req("auto1", 10, true));

        assert!(store.remove("auto1"));
        assert!(!store.remove("auto1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_winner_is_priority_maximum() {
        let mut store = RequestStore::new();
        store.put(req("low", 1, true));
        store.put(req("high", 99, false));
        store.put(req("mid", 50, true));

        assert_eq!(store.winner().unwrap().id, "high");
    }

    #[test]
    fn test_winner_tie_goes_to_most_recent_push() {
        let mut store = RequestStore::new();
        store.put(req("a", 5, true));
        store.put(req("b", 5, false));

        assert_eq!(store.winner().unwrap().id, "b");

        // Re-pushing "a" refreshes its recency and takes the tie back
        store.put(req("a", 5, true));
        assert_eq!(store.winner().unwrap().id, "a");
    }

    #[test]
    fn test_winner_of_empty_store() {
        let store = RequestStore::new();
        assert!(store.winner().is_none());
    }

    #[test]
    fn test_snapshot_in_arbitration_order() {
        let mut store = RequestStore::new();
        store.put(req("low", 1, true));
        store.put(req("a", 5, true));
        store.put(req("b", 5, false));
        store.put(req("high", 9, true));

        let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["high", "b", "a", "low"]);
    }

    #[test]
    fn test_snapshot_head_matches_winner() {
        let mut store = RequestStore::new();
        store.put(req("x", 5, true));
        store.put(req("y", 5, false));
        store.put(req("z", 2, true));

        assert_eq!(store.snapshot()[0].id, store.winner().unwrap().id);
    }
}
