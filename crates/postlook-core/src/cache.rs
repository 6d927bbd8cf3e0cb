// ── Response cache ──
//
// Memoizes lookup outcomes (failures included) keyed by the normalized
// request triple, so re-typing the same input never re-hits the network.
// Unbounded, no TTL: entries live as long as the controller instance,
// which matches a page lifetime in the original setting.

use std::collections::HashMap;

use postlook_api::LookupRequest;

use crate::model::LookupResult;

/// Per-controller memoization of lookup outcomes.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: HashMap<LookupRequest, LookupResult>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached outcome for this request, if any. Keys are normalized, so
    /// equivalent spellings hit the same entry.
    pub fn get(&self, request: &LookupRequest) -> Option<&LookupResult> {
        self.entries.get(&request.normalized())
    }

    /// Insert an outcome. Entries are immutable once written: a second
    /// insert for the same key leaves the first result in place.
    pub fn insert(&mut self, request: &LookupRequest, result: LookupResult) {
        self.entries.entry(request.normalized()).or_insert(result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
