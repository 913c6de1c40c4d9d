//! Typed payloads of the dashboard API.
//!
//! These are the `data` members of the `{status, data}` envelope.  The demo
//! datasets in [`crate::demo`] are written against the same types, so a
//! renderer never has to know where its data came from.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Kpis {
    pub total_movies: u64,
    pub total_revenue_b: f64,
    pub avg_roi: f64,
    pub avg_rating: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GenreStat {
    pub genre: Arc<str>,
    pub avg_budget: f64,
    pub avg_revenue: f64,
    pub avg_roi: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    pub title: Arc<str>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Pipe-separated genre names, primary genre first.
    #[serde(default)]
    pub genres: Arc<str>,
    #[serde(default)]
    pub poster: Option<Arc<str>>,
    #[serde(default)]
    pub overview: Option<Arc<str>>,
    #[serde(default)]
    pub budget_m: f64,
    #[serde(default)]
    pub revenue_m: f64,
    #[serde(default)]
    pub roi: f64,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    pub fn genre_names(&self) -> impl Iterator<Item = &str> {
        self.genres.split('|').filter(|g| !g.is_empty())
    }

    pub fn primary_genre(&self) -> Option<&str> {
        self.genre_names().next()
    }

    pub fn title_with_year(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    pub label: Arc<str>,
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AudienceProfile {
    pub genre: Arc<str>,
    pub avg_roi: f64,
    pub avg_budget: f64,
    pub market_share: f64,
    #[serde(default)]
    pub age_groups: Vec<Segment>,
    #[serde(default)]
    pub gender_split: Vec<Segment>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimilarFilm {
    pub title: Arc<str>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Arc<str>,
    #[serde(default)]
    pub poster: Option<Arc<str>>,
    #[serde(default)]
    pub revenue_m: Option<f64>,
    #[serde(default)]
    pub similarity: f64,
}

impl SimilarFilm {
    /// Detail-panel view of a similar film, which carries less than a full movie.
    pub fn to_movie(&self) -> Movie {
        Movie {
            title: self.title.clone(),
            year: self.year,
            genres: self.genres.clone(),
            poster: self.poster.clone(),
            overview: None,
            budget_m: 0.0,
            revenue_m: self.revenue_m.unwrap_or_default(),
            roi: 0.0,
            vote_average: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Simulation {
    pub viability: u32,
    pub risk: Risk,
    pub predicted_genre: Arc<str>,
    pub est_revenue_m: f64,
    pub est_roi: f64,
    #[serde(default)]
    pub audience_match: Option<f64>,
    #[serde(default)]
    pub similar_films: Vec<SimilarFilm>,
}

/// Body of the simulate action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PitchRequest {
    pub pitch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_tier: Option<String>,
}

impl PitchRequest {
    pub fn new(pitch: impl Into<String>) -> Self {
        Self {
            pitch: pitch.into(),
            ..Self::default()
        }
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn budget_tier(mut self, tier: impl Into<String>) -> Self {
        self.budget_tier = Some(tier.into());
        self
    }
}
