use std::{fmt, sync::Arc};

/// Top-level screens of the dashboard.  Exactly one is active at a time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ViewId {
    #[default]
    Dashboard,
    Movies,
    Statistics,
    Audience,
    Studio,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::Dashboard,
        ViewId::Movies,
        ViewId::Statistics,
        ViewId::Audience,
        ViewId::Studio,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::Movies => "Movies",
            ViewId::Statistics => "Statistics",
            ViewId::Audience => "Audience",
            ViewId::Studio => "Studio",
        }
    }

    /// Ids of the charts this view owns.  They are torn down when the view
    /// stops being active.
    pub fn chart_ids(self) -> &'static [&'static str] {
        match self {
            ViewId::Dashboard => &[chart_ids::ROI_BAR, chart_ids::ROI_BUBBLE],
            ViewId::Movies => &[],
            ViewId::Statistics => &[chart_ids::GENRE_SHARE],
            ViewId::Audience => &[chart_ids::AUDIENCE_AGE, chart_ids::AUDIENCE_GENDER],
            ViewId::Studio => &[chart_ids::AUDIENCE_MATCH],
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub mod chart_ids {
    pub const ROI_BAR: &str = "dashboard.roi-bar";
    pub const ROI_BUBBLE: &str = "dashboard.roi-bubble";
    pub const GENRE_SHARE: &str = "statistics.genre-share";
    pub const AUDIENCE_AGE: &str = "audience.age";
    pub const AUDIENCE_GENDER: &str = "audience.gender";
    pub const AUDIENCE_MATCH: &str = "studio.audience-match";
}

/// A request to show `target`, optionally with new filter parameters.
/// Parameters a view does not use are ignored.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NavigationRequest {
    pub target: ViewId,
    pub genre: Option<Arc<str>>,
    pub search: Option<Arc<str>>,
    pub page: Option<u32>,
}

impl NavigationRequest {
    pub fn new(target: ViewId) -> Self {
        Self {
            target,
            genre: None,
            search: None,
            page: None,
        }
    }

    pub fn genre(mut self, genre: impl Into<Arc<str>>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn search(mut self, search: impl Into<Arc<str>>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

impl From<ViewId> for NavigationRequest {
    fn from(target: ViewId) -> Self {
        Self::new(target)
    }
}
