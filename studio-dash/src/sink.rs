//! Structured view updates.
//!
//! Renderers describe what changes on screen as [`Patch`]es; a host turns
//! them into DOM writes, widget updates, or anything else.  [`MemorySink`]
//! folds them into an in-memory screen, which is what headless hosts and the
//! tests look at.

use std::{collections::HashMap, sync::Arc};

use crate::{action::Action, data::ViewId};

/// Addressable elements of the dashboard.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    // Dashboard
    KpiMovies,
    KpiRevenue,
    KpiRoi,
    KpiRating,
    RoiCharts,
    RoiBarChart,
    RoiBubbleChart,
    TopMoviesTable,
    // Movies
    MoviesSearch,
    MoviesGrid,
    MoviesTotal,
    MoviesPage,
    MoviesPrevious,
    MoviesNext,
    // Statistics
    GenreShareChart,
    GenreTable,
    // Audience
    AudienceTitle,
    AudienceAvgRoi,
    AudienceAvgBudget,
    AudienceMarketShare,
    AudienceCharts,
    VanguardTable,
    // Studio
    GenreOptions,
    PitchInput,
    AnalyzeButton,
    SimResult,
    SimScore,
    SimRevenue,
    SimRoi,
    SimRisk,
    SimGenre,
    SimFilms,
}

/// Emphasis of a value, e.g. the simulator's risk rating.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tone {
    Good,
    Warn,
    Caution,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub on_click: Option<Action>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub detail: String,
    pub poster: Option<Arc<str>>,
    pub on_click: Option<Action>,
}

/// Prepared content of the movie detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetail {
    pub title: String,
    pub poster: Option<Arc<str>>,
    pub genres: String,
    pub year: String,
    pub overview: String,
    pub budget: String,
    pub revenue: String,
    pub roi: String,
    pub rating: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Patch {
    /// Make `ViewId` the only visible view and mark it in the navigation.
    ShowView(ViewId),
    SetText(Slot, String),
    SetVisible(Slot, bool),
    SetEnabled(Slot, bool),
    SetInvalid(Slot, bool),
    SetTone(Slot, Tone),
    ReplaceRows(Slot, Vec<Row>),
    ReplaceCards(Slot, Vec<Card>),
    ReplaceOptions(Slot, Vec<Arc<str>>),
    /// Explicit "no data" state of a collection or chart area.
    ShowEmpty(Slot, String),
    HideEmpty(Slot),
    ShowMovie(MovieDetail),
    HideMovie,
}

pub trait ViewSink {
    fn apply(&mut self, patch: Patch);
}

impl<S: ViewSink + ?Sized> ViewSink for Box<S> {
    fn apply(&mut self, patch: Patch) {
        (**self).apply(patch)
    }
}

/// The visible result of every patch applied so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    pub view: Option<ViewId>,
    texts: HashMap<Slot, String>,
    visible: HashMap<Slot, bool>,
    enabled: HashMap<Slot, bool>,
    invalid: HashMap<Slot, bool>,
    tones: HashMap<Slot, Tone>,
    rows: HashMap<Slot, Vec<Row>>,
    cards: HashMap<Slot, Vec<Card>>,
    options: HashMap<Slot, Vec<Arc<str>>>,
    empty: HashMap<Slot, String>,
    pub movie: Option<MovieDetail>,
}

impl Screen {
    fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::ShowView(view) => self.view = Some(view),
            Patch::SetText(slot, text) => {
                self.texts.insert(slot, text);
            }
            Patch::SetVisible(slot, visible) => {
                self.visible.insert(slot, visible);
            }
            Patch::SetEnabled(slot, enabled) => {
                self.enabled.insert(slot, enabled);
            }
            Patch::SetInvalid(slot, invalid) => {
                self.invalid.insert(slot, invalid);
            }
            Patch::SetTone(slot, tone) => {
                self.tones.insert(slot, tone);
            }
            Patch::ReplaceRows(slot, rows) => {
                self.empty.remove(&slot);
                self.rows.insert(slot, rows);
            }
            Patch::ReplaceCards(slot, cards) => {
                self.empty.remove(&slot);
                self.cards.insert(slot, cards);
            }
            Patch::ReplaceOptions(slot, options) => {
                self.options.insert(slot, options);
            }
            Patch::ShowEmpty(slot, message) => {
                self.rows.remove(&slot);
                self.cards.remove(&slot);
                self.empty.insert(slot, message);
            }
            Patch::HideEmpty(slot) => {
                self.empty.remove(&slot);
            }
            Patch::ShowMovie(detail) => self.movie = Some(detail),
            Patch::HideMovie => self.movie = None,
        }
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    pub fn is_visible(&self, slot: Slot) -> Option<bool> {
        self.visible.get(&slot).copied()
    }

    pub fn is_enabled(&self, slot: Slot) -> Option<bool> {
        self.enabled.get(&slot).copied()
    }

    pub fn is_invalid(&self, slot: Slot) -> bool {
        self.invalid.get(&slot).copied().unwrap_or(false)
    }

    pub fn tone(&self, slot: Slot) -> Option<Tone> {
        self.tones.get(&slot).copied()
    }

    pub fn rows(&self, slot: Slot) -> &[Row] {
        self.rows.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn cards(&self, slot: Slot) -> &[Card] {
        self.cards.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn options(&self, slot: Slot) -> &[Arc<str>] {
        self.options.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn empty_message(&self, slot: Slot) -> Option<&str> {
        self.empty.get(&slot).map(String::as_str)
    }
}

/// Headless sink keeping the folded [`Screen`] and the patches behind it.
#[derive(Debug, Default)]
pub struct MemorySink {
    screen: Screen,
    patches: Vec<Patch>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn take_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }
}

impl ViewSink for MemorySink {
    fn apply(&mut self, patch: Patch) {
        self.patches.push(patch.clone());
        self.screen.apply(patch);
    }
}
