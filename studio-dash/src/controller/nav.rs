use std::{
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde_json::Value;
use studio_core::{
    model::{PitchRequest, Simulation},
    webapi::{decode, Backend, RequestBuilder, WebApi},
    Config, FetchError, FetchResult,
};
use threadpool::ThreadPool;

use super::{
    fallback::{Fallback, Source},
    fetch::{plan, Fetch, Payload},
};
use crate::{
    action::Action,
    chart::{ChartBackend, ChartRegistry},
    data::{
        NavigationRequest, PitchError, SimulationState, SimulationTicket, ViewId, ViewState,
    },
    render::{audience, dashboard, detail, movies, statistics, studio, RenderCtx},
    sink::{Patch, ViewSink},
};

const MIN_PITCH_LEN: usize = 10;

/// Identifies one navigation.  Results carrying any other ticket are stale.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ticket {
    seq: u64,
    view: ViewId,
}

enum Completion {
    Fetch {
        ticket: Ticket,
        fetch: Fetch,
        result: FetchResult<Value>,
    },
    Simulate {
        ticket: SimulationTicket,
        result: FetchResult<Value>,
    },
    /// The backend panicked.  Whatever it was answering settles on its
    /// deadline.
    Lost,
}

/// Orchestrates navigation, fetching and rendering.
///
/// Fetches run on a thread pool and report back over a channel; everything
/// else, including every render, happens on the thread calling
/// [`poll`](Self::poll) or [`wait_idle`](Self::wait_idle).  Each navigation
/// gets a fresh [`Ticket`] and results are applied only while their ticket
/// is still the current one.
pub struct ViewController<S> {
    config: Config,
    backend: Arc<dyn Backend>,
    pool: ThreadPool,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    state: ViewState,
    charts: ChartRegistry,
    sink: S,
    fallback: Fallback,
    seq: u64,
    ticket: Ticket,
    /// Deadlines of the current navigation's unsettled fetches.
    pending: HashMap<Fetch, Instant>,
    /// Requests handed to the pool whose completion has not been received,
    /// stale ones included.
    in_flight: usize,
    degraded: bool,
    has_next_page: bool,
    simulation: SimulationState,
    simulation_seq: u64,
    simulation_deadline: Option<Instant>,
}

impl<S: ViewSink> ViewController<S> {
    pub fn new(
        config: Config,
        backend: Arc<dyn Backend>,
        charts: impl ChartBackend + 'static,
        sink: S,
    ) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let pool = ThreadPool::with_name("fetch".into(), config.fetch_threads.max(1));
        let fallback = Fallback::new(config.cache_capacity);
        let state = ViewState::default();
        Self {
            ticket: Ticket {
                seq: 0,
                view: state.active,
            },
            config,
            backend,
            pool,
            sender,
            receiver,
            state,
            charts: ChartRegistry::new(charts),
            sink,
            fallback,
            seq: 0,
            pending: HashMap::new(),
            in_flight: 0,
            degraded: false,
            has_next_page: false,
            simulation: SimulationState::default(),
            simulation_seq: 0,
            simulation_deadline: None,
        }
    }

    /// Controller talking to the HTTP API at `config.api_base`.
    pub fn connect(config: Config, charts: impl ChartBackend + 'static, sink: S) -> Self {
        let backend = Arc::new(WebApi::new(&config));
        Self::new(config, backend, charts, sink)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the current view shows cached or demo data for some fetch.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Nothing is pending and no request is out, stale ones included.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && !self.simulation.is_pending() && self.in_flight == 0
    }

    pub fn navigate(&mut self, request: impl Into<NavigationRequest>) {
        let request = request.into();
        let previous = self.state.active;
        self.state.apply(&request);
        let active = self.state.active;
        if previous != active {
            self.charts.teardown_all(previous.chart_ids().iter().copied());
        }

        self.seq += 1;
        self.ticket = Ticket {
            seq: self.seq,
            view: active,
        };
        self.pending.clear();
        self.degraded = false;
        self.has_next_page = false;
        log::info!("navigating to {active} ({})", self.seq);

        let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
        ctx.patch(Patch::ShowView(active));
        detail::hide(&mut ctx);
        match active {
            ViewId::Dashboard => dashboard::roi_chart_mode(&mut ctx, self.state.roi_chart),
            ViewId::Movies => movies::query(&mut ctx, &self.state.movies),
            ViewId::Statistics => {}
            ViewId::Audience => audience::header(&mut ctx, &self.state.audience_genre),
            ViewId::Studio => studio::simulator(&mut ctx, &self.simulation),
        }

        for fetch in plan(&self.state, &self.config) {
            self.spawn(fetch);
        }
    }

    /// Re-issue the active view's fetches with unchanged parameters.
    pub fn refresh(&mut self) {
        self.navigate(self.state.active);
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Navigate(request) => self.navigate(request),
            Action::Refresh => self.refresh(),
            Action::NextPage => {
                if self.state.is_active(ViewId::Movies) && self.has_next_page {
                    let page = self.state.movies.page() + 1;
                    self.navigate(NavigationRequest::new(ViewId::Movies).page(page));
                } else {
                    log::debug!("no next page");
                }
            }
            Action::PreviousPage => {
                if self.state.is_active(ViewId::Movies) && self.state.movies.has_previous() {
                    let page = self.state.movies.page() - 1;
                    self.navigate(NavigationRequest::new(ViewId::Movies).page(page));
                } else {
                    log::debug!("no previous page");
                }
            }
            Action::Search(text) => {
                self.navigate(NavigationRequest::new(ViewId::Movies).search(text).page(1));
            }
            Action::ShowRoiChart(mode) => {
                self.state.roi_chart = mode;
                if self.state.is_active(ViewId::Dashboard) {
                    let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
                    dashboard::roi_chart_mode(&mut ctx, mode);
                }
            }
            Action::ChartClick { id, dataset, index } => {
                match self.charts.click(id.as_str(), dataset, index) {
                    Some(request) => self.navigate(request),
                    None => log::debug!("click on {id} has no target"),
                }
            }
            Action::ShowMovie(movie) => {
                let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
                detail::show(&mut ctx, &movie);
            }
            Action::CloseMovie => {
                let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
                detail::hide(&mut ctx);
            }
            Action::Simulate(pitch) => {
                if let Err(err) = self.simulate(pitch) {
                    log::debug!("pitch rejected: {err}");
                }
            }
        }
    }

    /// Validate `pitch` and send it off.  A newer request supersedes any
    /// simulation still loading.
    pub fn simulate(&mut self, pitch: PitchRequest) -> Result<(), PitchError> {
        let text = pitch.pitch.trim().to_string();
        let valid = text.chars().count() >= MIN_PITCH_LEN;
        {
            let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
            studio::pitch_invalid(&mut ctx, !valid);
        }
        if !valid {
            return Err(PitchError::TooShort {
                min: MIN_PITCH_LEN,
            });
        }
        let pitch = PitchRequest {
            pitch: text,
            ..pitch
        };

        self.simulation_seq += 1;
        let ticket = SimulationTicket(self.simulation_seq);
        self.simulation.defer(ticket);
        self.simulation_deadline = Some(Instant::now() + self.config.timeout());
        self.render_simulator();

        let request = RequestBuilder::simulate(&pitch);
        self.execute(move |backend| Completion::Simulate {
            ticket,
            result: backend.fetch(&request),
        });
        Ok(())
    }

    /// Check whether the backend is back while the view shows fallback
    /// data.  A healthy answer reloads the view.  Returns whether a probe
    /// was sent.
    pub fn probe_backend(&mut self) -> bool {
        if !self.degraded || self.pending.contains_key(&Fetch::Health) {
            return false;
        }
        log::debug!("probing backend");
        self.spawn(Fetch::Health);
        true
    }

    /// Apply every completion that has arrived and settle expired fetches.
    /// Never blocks.  Returns the number of completions received.
    pub fn poll(&mut self) -> usize {
        let mut received = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            self.complete(completion);
            received += 1;
        }
        self.expire(Instant::now());
        received
    }

    /// Process completions until idle or until `timeout` passes.  Returns
    /// whether the controller went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let until = Instant::now() + timeout;
        loop {
            self.poll();
            if self.is_idle() {
                return true;
            }
            let now = Instant::now();
            if now >= until {
                return false;
            }
            let wake = self.next_deadline().map_or(until, |deadline| deadline.min(until));
            match self.receiver.recv_timeout(wake.saturating_duration_since(now)) {
                Ok(completion) => self.complete(completion),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .values()
            .copied()
            .chain(self.simulation_deadline)
            .min()
    }

    fn spawn(&mut self, fetch: Fetch) {
        self.pending
            .insert(fetch.clone(), Instant::now() + self.config.timeout());
        let ticket = self.ticket;
        self.execute(move |backend| {
            let result = backend.fetch(&fetch.request());
            Completion::Fetch {
                ticket,
                fetch,
                result,
            }
        });
    }

    fn execute(&mut self, job: impl FnOnce(&dyn Backend) -> Completion + Send + 'static) {
        self.in_flight += 1;
        let backend = self.backend.clone();
        let sender = self.sender.clone();
        self.pool.execute(move || {
            let completion = panic::catch_unwind(AssertUnwindSafe(|| job(&*backend)))
                .unwrap_or(Completion::Lost);
            if sender.send(completion).is_err() {
                log::debug!("controller is gone, dropping completion");
            }
        });
    }

    fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Fetch {
                ticket,
                fetch,
                result,
            } => {
                if ticket != self.ticket {
                    log::debug!(
                        "discarding stale {} for {} ({})",
                        fetch.endpoint(),
                        ticket.view,
                        ticket.seq
                    );
                } else if self.pending.remove(&fetch).is_none() {
                    log::debug!("discarding late {}", fetch.endpoint());
                } else {
                    self.settle(fetch, result);
                }
            }
            Completion::Simulate { ticket, result } => {
                let result = result.and_then(decode::<Simulation>);
                self.settle_simulation(ticket, result);
            }
            Completion::Lost => log::error!("backend panicked, request left to time out"),
        }
    }

    fn expire(&mut self, now: Instant) {
        let expired: Vec<Fetch> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(fetch, _)| fetch.clone())
            .collect();
        for fetch in expired {
            self.pending.remove(&fetch);
            self.settle(fetch, Err(FetchError::Timeout));
        }

        if self.simulation_deadline.is_some_and(|deadline| deadline <= now) {
            if let SimulationState::Deferred(ticket) = self.simulation {
                self.settle_simulation(ticket, Err(FetchError::Timeout));
            }
            self.simulation_deadline = None;
        }
    }

    fn settle(&mut self, fetch: Fetch, result: FetchResult<Value>) {
        if fetch == Fetch::Health {
            match result {
                Ok(_) => {
                    log::info!("backend is reachable again, reloading {}", self.state.active);
                    self.refresh();
                }
                Err(err) => log::debug!("backend still unavailable: {err}"),
            }
            return;
        }

        let live = result.and_then(|data| self.fallback.accept(&fetch, data));
        let (payload, source) = match live {
            Ok(payload) => (payload, Source::Live),
            Err(err) => match self.fallback.substitute(&fetch, &err) {
                Some(substitute) => substitute,
                None => return,
            },
        };
        if source != Source::Live {
            self.degraded = true;
        }
        self.render(payload);
    }

    fn settle_simulation(&mut self, ticket: SimulationTicket, result: FetchResult<Simulation>) {
        if !self.simulation.update((ticket, result)) {
            log::debug!("discarding superseded simulation {}", ticket.0);
            return;
        }
        if let SimulationState::Rejected(err) = &self.simulation {
            log::warn!("simulation failed ({}: {err}), showing demo result", err.kind());
        }
        self.simulation_deadline = None;
        self.render_simulator();
    }

    fn render_simulator(&mut self) {
        if self.state.is_active(ViewId::Studio) {
            let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
            studio::simulator(&mut ctx, &self.simulation);
        }
    }

    fn render(&mut self, payload: Payload) {
        let active = self.state.active;
        let mut ctx = RenderCtx::new(&mut self.sink, &mut self.charts);
        match payload {
            Payload::Kpis(kpis) => dashboard::kpis(&mut ctx, &kpis),
            Payload::GenreStats(stats) => match active {
                ViewId::Dashboard => {
                    dashboard::genre_charts(&mut ctx, &stats, self.state.roi_chart)
                }
                ViewId::Statistics => statistics::genres(&mut ctx, &stats),
                ViewId::Studio => studio::genre_options(&mut ctx, &stats),
                ViewId::Movies | ViewId::Audience => {}
            },
            Payload::TopMovies(top) => match active {
                ViewId::Dashboard => dashboard::top_movies(&mut ctx, &top),
                ViewId::Audience => audience::vanguard(&mut ctx, &top),
                _ => {}
            },
            Payload::AudienceProfile(profile) => audience::profile(&mut ctx, &profile),
            Payload::Movies(page) => {
                self.has_next_page = page.has_more;
                movies::page(&mut ctx, &self.state.movies, &page);
            }
            Payload::Health => {}
        }
    }
}
