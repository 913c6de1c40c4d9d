//! Per-view renderers.
//!
//! A renderer maps data that is already in hand to view updates.  None of
//! them fetch, and every chart goes through the [`ChartRegistry`].

pub mod audience;
pub mod dashboard;
pub mod detail;
pub mod movies;
pub mod statistics;
pub mod studio;

use std::sync::Arc;

use studio_core::model::Movie;

use crate::{
    action::Action,
    chart::{ChartConfig, ChartId, ChartRegistry},
    data::ViewId,
    sink::{Patch, Row, Slot, ViewSink},
};

pub struct RenderCtx<'a> {
    pub sink: &'a mut dyn ViewSink,
    pub charts: &'a mut ChartRegistry,
}

impl<'a> RenderCtx<'a> {
    pub fn new(sink: &'a mut dyn ViewSink, charts: &'a mut ChartRegistry) -> Self {
        Self { sink, charts }
    }

    pub fn patch(&mut self, patch: Patch) {
        self.sink.apply(patch);
    }

    pub fn text(&mut self, slot: Slot, text: impl Into<String>) {
        self.sink.apply(Patch::SetText(slot, text.into()));
    }

    pub fn visible(&mut self, slot: Slot, visible: bool) {
        self.sink.apply(Patch::SetVisible(slot, visible));
    }

    pub fn enabled(&mut self, slot: Slot, enabled: bool) {
        self.sink.apply(Patch::SetEnabled(slot, enabled));
    }

    pub fn chart(&mut self, id: &str, config: ChartConfig) {
        self.charts.render(ChartId::from(id), config);
    }

    /// Tear down `view`'s charts and show an empty state in their place.
    pub fn empty_charts(&mut self, view: ViewId, slot: Slot, message: &str) {
        self.charts.teardown_all(view.chart_ids().iter().copied());
        self.sink.apply(Patch::ShowEmpty(slot, message.to_string()));
    }
}

const DEFAULT_COLOR: &str = "#8b5cf6";

/// Series color of a genre.
pub fn color_for(genre: &str) -> &'static str {
    match genre {
        "Action" => "#3b82f6",
        "Adventure" => "#6366f1",
        "Animation" => "#06b6d4",
        "Comedy" => "#22c55e",
        "Crime" => "#f97316",
        "Documentary" => "#a1a1aa",
        "Drama" => "#ec4899",
        "Fantasy" => "#a78bfa",
        "Horror" => "#ef4444",
        "Musical" => "#fbbf24",
        "Mystery" => "#14b8a6",
        "Romance" => "#f43f5e",
        "Sci-Fi" | "Science Fiction" => "#a855f7",
        "Thriller" => "#eab308",
        "War" => "#84cc16",
        "Western" => "#b45309",
        _ => DEFAULT_COLOR,
    }
}

pub fn money_m(amount: f64) -> String {
    format!("${amount}M")
}

pub fn ratio(value: f64) -> String {
    format!("{value}x")
}

pub fn stars(rating: f64) -> String {
    format!("⭐ {rating}")
}

fn open_movie(movie: &Movie) -> Option<Action> {
    Some(Action::ShowMovie(Arc::new(movie.clone())))
}

/// Clickable ranking row: title, year, ROI, revenue, rating.
fn ranking_row(movie: &Movie) -> Row {
    Row {
        cells: vec![
            movie.title.to_string(),
            movie.year.map(|y| y.to_string()).unwrap_or_default(),
            ratio(movie.roi),
            money_m(movie.revenue_m),
            stars(movie.vote_average),
        ],
        on_click: open_movie(movie),
    }
}
