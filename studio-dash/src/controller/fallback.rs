use serde_json::Value;
use studio_core::{demo, webapi::ResponseCache, FetchError};

use super::fetch::{Fetch, Payload};

/// Where rendered data came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Source {
    Live,
    Cached,
    Demo,
}

/// Substitute data for failed fetches: the last good response to the same
/// request if there is one, the demo dataset otherwise.
pub struct Fallback {
    cache: ResponseCache,
}

impl Fallback {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: ResponseCache::new(capacity),
        }
    }

    /// Decode a live response, remembering it when it is usable.
    pub fn accept(&self, fetch: &Fetch, data: Value) -> Result<Payload, FetchError> {
        let payload = fetch.decode(data.clone())?;
        self.cache.set(&fetch.request(), data);
        Ok(payload)
    }

    pub fn substitute(&self, fetch: &Fetch, err: &FetchError) -> Option<(Payload, Source)> {
        let endpoint = fetch.endpoint();
        if let Some(data) = self.cache.get(&fetch.request()) {
            match fetch.decode(data) {
                Ok(payload) => {
                    log::warn!("{endpoint} failed ({}: {err}), using last good data", err.kind());
                    return Some((payload, Source::Cached));
                }
                Err(cache_err) => log::error!("cached {endpoint} is unusable: {cache_err}"),
            }
        }
        match fetch.decode(demo::get(endpoint)) {
            Ok(payload) => {
                log::warn!("{endpoint} failed ({}: {err}), using demo data", err.kind());
                Some((payload, Source::Demo))
            }
            Err(demo_err) => {
                log::error!("demo {endpoint} does not decode: {demo_err}");
                None
            }
        }
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
