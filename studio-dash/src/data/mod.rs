mod nav;
mod promise;
mod view_state;

use std::{error, fmt};

use studio_core::model::Simulation;

pub use crate::data::{
    nav::{chart_ids, NavigationRequest, ViewId},
    promise::{Promise, PromiseState},
    view_state::{MoviesQuery, RoiChartMode, ViewState, ALL_GENRES},
};

/// Identifies one simulate request.  Only the latest one may settle the
/// simulator state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SimulationTicket(pub u64);

pub type SimulationState = Promise<Simulation, SimulationTicket>;

/// Local validation failure of a simulator pitch.  No request is sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PitchError {
    TooShort { min: usize },
}

impl error::Error for PitchError {}

impl fmt::Display for PitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "Pitch must be at least {min} characters"),
        }
    }
}
