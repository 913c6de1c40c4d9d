//! Chart descriptions and the registry owning live chart instances.
//!
//! The charting library itself is external.  It is reached only through
//! [`ChartBackend`], and only [`ChartRegistry`] calls it.

mod registry;

use std::{borrow::Borrow, fmt, sync::Arc};

pub use registry::ChartRegistry;

use crate::data::{NavigationRequest, ViewId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(Arc<str>);

impl ChartId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChartId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl Borrow<str> for ChartId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ChartKind {
    Bar,
    Bubble,
    Doughnut,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Axis {
    #[default]
    Primary,
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BubblePoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    Values(Vec<f64>),
    Bubbles(Vec<BubblePoint>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Values(values) => values.len(),
            Series::Bubbles(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: Arc<str>,
    pub series: Series,
    /// One color per point, or a single color for the whole dataset.
    pub colors: Vec<&'static str>,
    pub axis: Axis,
}

/// What a click on a data point of this chart means.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrillDown {
    /// The clicked label is a genre; open the audience view filtered to it.
    AudienceByGenre,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<Arc<str>>,
    pub datasets: Vec<Dataset>,
    pub drill_down: Option<DrillDown>,
}

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            datasets: Vec::new(),
            drill_down: None,
        }
    }

    pub fn labels(mut self, labels: impl IntoIterator<Item = Arc<str>>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn drill_down(mut self, drill_down: DrillDown) -> Self {
        self.drill_down = Some(drill_down);
        self
    }

    /// Label of a clicked point.  Bubble charts carry one dataset per
    /// category, so their label is the dataset's; the others label by index.
    pub fn label_at(&self, dataset: usize, index: usize) -> Option<&Arc<str>> {
        match self.kind {
            ChartKind::Bubble => self.datasets.get(dataset).map(|d| &d.label),
            ChartKind::Bar | ChartKind::Doughnut => self.labels.get(index),
        }
    }

    pub fn drill_down_request(&self, dataset: usize, index: usize) -> Option<NavigationRequest> {
        let label = self.label_at(dataset, index)?;
        match self.drill_down? {
            DrillDown::AudienceByGenre => {
                Some(NavigationRequest::new(ViewId::Audience).genre(label.clone()))
            }
        }
    }
}

/// Factory side of the external charting library.
pub trait ChartBackend {
    fn create(&mut self, id: &ChartId, config: &ChartConfig) -> Box<dyn ChartInstance>;
}

/// A live chart object owned by the registry.
pub trait ChartInstance {
    /// Replace the data of a chart of unchanged kind.
    fn update(&mut self, config: &ChartConfig);

    /// Release the chart and everything it attached.  Called exactly once.
    fn destroy(&mut self);
}
