use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use url::form_urlencoded;

use super::request::RequestBuilder;

/// In-memory store of the last good `data` payload per request.  Used as the
/// first fallback when a fetch fails, before falling back to demo data.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, Value>>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, request: &RequestBuilder) -> Option<Value> {
        self.entries.lock().get(&Self::key(request)).cloned()
    }

    pub fn set(&self, request: &RequestBuilder, data: Value) {
        self.entries.lock().put(Self::key(request), data);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Endpoint plus parameters, sorted and form-encoded so that values
    /// containing `&` or `=` can't collide with other parameter sets.
    fn key(request: &RequestBuilder) -> String {
        let mut queries: Vec<_> = request.get_queries().iter().collect();
        queries.sort();
        form_urlencoded::Serializer::new(String::new())
            .append_pair("endpoint", request.endpoint().as_str())
            .extend_pairs(queries.into_iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish()
    }
}
