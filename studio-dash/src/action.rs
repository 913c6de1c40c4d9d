//! User interactions a host feeds into the controller.

use std::sync::Arc;

use studio_core::model::{Movie, PitchRequest};

use crate::{
    chart::ChartId,
    data::{NavigationRequest, RoiChartMode},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Navigate(NavigationRequest),
    /// Re-issue the fetches of the active view with unchanged parameters.
    Refresh,
    NextPage,
    PreviousPage,
    Search(Arc<str>),
    ShowRoiChart(RoiChartMode),
    /// A click on a data point: `dataset` and `index` as reported by the
    /// charting library.
    ChartClick {
        id: ChartId,
        dataset: usize,
        index: usize,
    },
    ShowMovie(Arc<Movie>),
    CloseMovie,
    Simulate(PitchRequest),
}

impl From<NavigationRequest> for Action {
    fn from(request: NavigationRequest) -> Self {
        Self::Navigate(request)
    }
}
