#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, Sender};
use serde_json::{json, Value};
use studio_core::{
    webapi::{Backend, Endpoint, RequestBuilder},
    Config, FetchError, FetchResult,
};
use studio_dash::{
    chart::{ChartBackend, ChartConfig, ChartId, ChartInstance},
    MemorySink, ViewController,
};

pub const WAIT: Duration = Duration::from_secs(10);

pub type Controller = ViewController<MemorySink>;

pub fn config() -> Config {
    Config {
        fetch_threads: 8,
        ..Config::default()
    }
}

pub fn controller(backend: &Arc<FakeBackend>) -> (Controller, Arc<Mutex<ChartLedger>>) {
    controller_with(config(), backend)
}

pub fn controller_with(
    config: Config,
    backend: &Arc<FakeBackend>,
) -> (Controller, Arc<Mutex<ChartLedger>>) {
    studio_dash::logging::init_for_tests();
    let ledger = Arc::new(Mutex::new(ChartLedger::default()));
    let controller = ViewController::new(
        config,
        backend.clone(),
        CountingCharts(ledger.clone()),
        MemorySink::new(),
    );
    (controller, ledger)
}

/// Poll until `done` holds.  For states reached while other requests are
/// still held, where `wait_idle` would not return.
pub fn wait_until(controller: &mut Controller, mut done: impl FnMut(&Controller) -> bool) -> bool {
    let until = Instant::now() + WAIT;
    while Instant::now() < until {
        controller.poll();
        if done(controller) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

type Predicate = Box<dyn Fn(&RequestBuilder) -> bool + Send + Sync>;
type Handler = Arc<dyn Fn(&RequestBuilder) -> FetchResult<Value> + Send + Sync>;

struct Hold {
    matches: Predicate,
    release: Receiver<()>,
}

/// Holds matching requests until released or dropped.
pub struct Gate(Sender<()>);

impl Gate {
    pub fn release(self) {}
}

/// Scripted stand-in for the dashboard API.
///
/// Unscripted endpoints answer with the `live_*` datasets below, which differ
/// from the demo ones so a test can tell where rendered data came from.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<Endpoint, Handler>>,
    failures: Mutex<HashMap<Endpoint, FetchError>>,
    fail_all: Mutex<Option<FetchError>>,
    delays: Mutex<HashMap<Endpoint, Duration>>,
    holds: Mutex<Vec<Hold>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(
        &self,
        endpoint: Endpoint,
        handler: impl Fn(&RequestBuilder) -> FetchResult<Value> + Send + Sync + 'static,
    ) {
        self.routes.lock().unwrap().insert(endpoint, Arc::new(handler));
    }

    pub fn reply(&self, endpoint: Endpoint, data: Value) {
        self.route(endpoint, move |_| Ok(data.clone()));
    }

    pub fn fail(&self, endpoint: Endpoint, err: FetchError) {
        self.failures.lock().unwrap().insert(endpoint, err);
    }

    pub fn fail_all(&self, err: FetchError) {
        *self.fail_all.lock().unwrap() = Some(err);
    }

    /// Forget every scripted failure.
    pub fn heal(&self) {
        *self.fail_all.lock().unwrap() = None;
        self.failures.lock().unwrap().clear();
    }

    pub fn delay(&self, endpoint: Endpoint, delay: Duration) {
        self.delays.lock().unwrap().insert(endpoint, delay);
    }

    pub fn gate(&self, endpoint: Endpoint) -> Gate {
        self.gate_when(move |request| request.endpoint() == endpoint)
    }

    pub fn gate_when(&self, matches: impl Fn(&RequestBuilder) -> bool + Send + Sync + 'static) -> Gate {
        let (sender, release) = crossbeam_channel::bounded(0);
        self.holds.lock().unwrap().push(Hold {
            matches: Box::new(matches),
            release,
        });
        Gate(sender)
    }

    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, endpoint: Endpoint) -> Vec<RequestBuilder> {
        self.requests()
            .into_iter()
            .filter(|request| request.endpoint() == endpoint)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn answer(&self, request: &RequestBuilder) -> FetchResult<Value> {
        if let Some(err) = self.fail_all.lock().unwrap().clone() {
            return Err(err);
        }
        if let Some(err) = self.failures.lock().unwrap().get(&request.endpoint()) {
            return Err(err.clone());
        }
        let handler = self.routes.lock().unwrap().get(&request.endpoint()).cloned();
        match handler {
            Some(handler) => handler(request),
            None => Ok(live_data(request)),
        }
    }
}

impl Backend for FakeBackend {
    fn fetch(&self, request: &RequestBuilder) -> FetchResult<Value> {
        self.requests.lock().unwrap().push(request.clone());

        let held: Vec<Receiver<()>> = self
            .holds
            .lock()
            .unwrap()
            .iter()
            .filter(|hold| (hold.matches)(request))
            .map(|hold| hold.release.clone())
            .collect();
        for release in held {
            // Returns once the gate is dropped.
            let _ = release.recv();
        }

        let delay = self.delays.lock().unwrap().get(&request.endpoint()).copied();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        self.answer(request)
    }
}

pub fn live_data(request: &RequestBuilder) -> Value {
    match request.endpoint() {
        Endpoint::Kpis => live_kpis(),
        Endpoint::GenreStats => live_genre_stats(),
        Endpoint::TopMovies => json!([live_movie("Halloween", "Horror|Thriller", 3.7)]),
        Endpoint::AudienceProfile => json!({
            "genre": request.get_query("genre").unwrap_or("All"),
            "avg_roi": 4.4,
            "avg_budget": 21.0,
            "market_share": 11.5,
            "age_groups": [{ "label": "18-24", "share": 44.0 }, { "label": "25-34", "share": 56.0 }],
            "gender_split": [{ "label": "Female", "share": 47.0 }, { "label": "Male", "share": 53.0 }],
        }),
        Endpoint::Movies => json!({
            "movies": [live_movie("Heat", "Crime|Drama", 2.3)],
            "total": 1,
            "has_more": false,
        }),
        Endpoint::Simulate => json!({
            "viability": 91,
            "risk": "Low",
            "predicted_genre": "Horror",
            "est_revenue_m": 140.0,
            "est_roi": 6.1,
            "audience_match": 64.0,
            "similar_films": [{
                "title": "It Follows", "year": 2014, "genres": "Horror|Mystery",
                "revenue_m": 23.0, "similarity": 87
            }],
        }),
        Endpoint::Health => json!({ "healthy": true }),
    }
}

pub fn live_kpis() -> Value {
    json!({ "total_movies": 4803, "total_revenue_b": 12.4, "avg_roi": 2.8, "avg_rating": 6.6 })
}

pub fn live_genre_stats() -> Value {
    json!([
        { "genre": "Drama", "avg_budget": 30.0, "avg_revenue": 90.0, "avg_roi": 2.5, "count": 900 },
        { "genre": "Horror", "avg_budget": 15.0, "avg_revenue": 80.0, "avg_roi": 5.1, "count": 300 },
        { "genre": "Western", "avg_budget": 40.0, "avg_revenue": 70.0, "avg_roi": 1.2, "count": 20 },
    ])
}

pub fn live_movie(title: &str, genres: &str, roi: f64) -> Value {
    json!({
        "title": title, "year": 1995, "genres": genres,
        "budget_m": 10.0, "revenue_m": 10.0 * roi, "roi": roi, "vote_average": 7.0,
    })
}

pub fn movie_page(titles: &[&str], total: u64, has_more: bool) -> Value {
    json!({
        "movies": titles.iter().map(|t| live_movie(t, "Action|Sci-Fi", 4.0)).collect::<Vec<_>>(),
        "total": total,
        "has_more": has_more,
    })
}

/// Create/destroy bookkeeping of every chart the registry ever touched.
#[derive(Debug, Default)]
pub struct ChartLedger {
    pub created: HashMap<String, usize>,
    pub destroyed: HashMap<String, usize>,
    pub updated: HashMap<String, usize>,
    /// Highest number of simultaneously live instances seen for any id.
    pub max_live: usize,
}

impl ChartLedger {
    pub fn live(&self, id: &str) -> usize {
        self.created.get(id).copied().unwrap_or(0) - self.destroyed.get(id).copied().unwrap_or(0)
    }

    pub fn total_live(&self) -> usize {
        self.created.keys().map(|id| self.live(id)).sum()
    }

    pub fn created(&self, id: &str) -> usize {
        self.created.get(id).copied().unwrap_or(0)
    }
}

pub struct CountingCharts(pub Arc<Mutex<ChartLedger>>);

struct CountingInstance {
    id: String,
    ledger: Arc<Mutex<ChartLedger>>,
}

impl ChartBackend for CountingCharts {
    fn create(&mut self, id: &ChartId, _config: &ChartConfig) -> Box<dyn ChartInstance> {
        let mut ledger = self.0.lock().unwrap();
        *ledger.created.entry(id.to_string()).or_default() += 1;
        let live = ledger.live(id.as_str());
        ledger.max_live = ledger.max_live.max(live);
        Box::new(CountingInstance {
            id: id.to_string(),
            ledger: self.0.clone(),
        })
    }
}

impl ChartInstance for CountingInstance {
    fn update(&mut self, _config: &ChartConfig) {
        *self.ledger.lock().unwrap().updated.entry(self.id.clone()).or_default() += 1;
    }

    fn destroy(&mut self) {
        *self.ledger.lock().unwrap().destroyed.entry(self.id.clone()).or_default() += 1;
    }
}
