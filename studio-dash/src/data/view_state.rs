use std::sync::Arc;

use super::{NavigationRequest, ViewId};

pub const ALL_GENRES: &str = "All";

/// Filter and pagination of the movies view.  The page number is 1-based and
/// can never drop below 1.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoviesQuery {
    page: u32,
    pub search: Arc<str>,
    pub genre: Arc<str>,
}

impl Default for MoviesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: "".into(),
            genre: "".into(),
        }
    }
}

impl MoviesQuery {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Which of the two dashboard ROI charts is visible.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RoiChartMode {
    #[default]
    Bar,
    Bubble,
}

/// The single source of truth for the active view and its parameters.  Pure
/// data: it is changed by the controller and read by renderers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewState {
    pub active: ViewId,
    pub movies: MoviesQuery,
    pub audience_genre: Arc<str>,
    pub roi_chart: RoiChartMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active: ViewId::Dashboard,
            movies: MoviesQuery::default(),
            audience_genre: ALL_GENRES.into(),
            roi_chart: RoiChartMode::default(),
        }
    }
}

impl ViewState {
    /// Merge `request` into the state and make its target active.
    pub fn apply(&mut self, request: &NavigationRequest) {
        match request.target {
            ViewId::Movies => self.apply_movies(request),
            ViewId::Audience => {
                if let Some(genre) = non_blank(request.genre.as_ref()) {
                    self.audience_genre = genre;
                }
            }
            ViewId::Dashboard | ViewId::Statistics | ViewId::Studio => {}
        }
        self.active = request.target;
    }

    fn apply_movies(&mut self, request: &NavigationRequest) {
        let mut filters_changed = false;
        if let Some(search) = &request.search {
            let search: Arc<str> = search.trim().into();
            filters_changed |= search != self.movies.search;
            self.movies.search = search;
        }
        if let Some(genre) = &request.genre {
            let genre: Arc<str> = match genre.trim() {
                ALL_GENRES => "".into(),
                genre => genre.into(),
            };
            filters_changed |= genre != self.movies.genre;
            self.movies.genre = genre;
        }
        match request.page {
            Some(page) => self.movies.set_page(page),
            None if filters_changed => self.movies.set_page(1),
            None => {}
        }
    }

    /// Genre filter for audience requests, `None` meaning every genre.
    pub fn audience_filter(&self) -> Option<&str> {
        match &*self.audience_genre {
            ALL_GENRES => None,
            genre => Some(genre),
        }
    }

    pub fn is_active(&self, view: ViewId) -> bool {
        self.active == view
    }
}

fn non_blank(value: Option<&Arc<str>>) -> Option<Arc<str>> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}
