use std::sync::Arc;

use serde_json::Value;
use studio_core::{
    model::{AudienceProfile, GenreStat, Kpis, Movie, MoviePage},
    webapi::{decode, Endpoint, RequestBuilder},
    Config, FetchResult,
};

use crate::data::{MoviesQuery, ViewId, ViewState};

/// One backend read a view needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fetch {
    Kpis,
    GenreStats,
    TopMovies {
        genre: Option<Arc<str>>,
        limit: usize,
    },
    AudienceProfile {
        genre: Arc<str>,
    },
    Movies {
        query: MoviesQuery,
        per_page: usize,
    },
    Health,
}

/// Typed result of a [`Fetch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Kpis(Kpis),
    GenreStats(Vec<GenreStat>),
    TopMovies(Vec<Movie>),
    AudienceProfile(AudienceProfile),
    Movies(MoviePage),
    Health,
}

impl Fetch {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Fetch::Kpis => Endpoint::Kpis,
            Fetch::GenreStats => Endpoint::GenreStats,
            Fetch::TopMovies { .. } => Endpoint::TopMovies,
            Fetch::AudienceProfile { .. } => Endpoint::AudienceProfile,
            Fetch::Movies { .. } => Endpoint::Movies,
            Fetch::Health => Endpoint::Health,
        }
    }

    pub fn request(&self) -> RequestBuilder {
        match self {
            Fetch::Kpis => RequestBuilder::kpis(),
            Fetch::GenreStats => RequestBuilder::genre_stats(),
            Fetch::TopMovies { genre, limit } => RequestBuilder::top_movies(genre.as_deref(), *limit),
            Fetch::AudienceProfile { genre } => RequestBuilder::audience_profile(genre),
            Fetch::Movies { query, per_page } => {
                RequestBuilder::movies(query.page(), *per_page, &query.search, &query.genre)
            }
            Fetch::Health => RequestBuilder::health(),
        }
    }

    pub fn decode(&self, data: Value) -> FetchResult<Payload> {
        Ok(match self {
            Fetch::Kpis => Payload::Kpis(decode(data)?),
            Fetch::GenreStats => Payload::GenreStats(decode(data)?),
            Fetch::TopMovies { .. } => Payload::TopMovies(decode(data)?),
            Fetch::AudienceProfile { .. } => Payload::AudienceProfile(decode(data)?),
            Fetch::Movies { .. } => Payload::Movies(decode(data)?),
            Fetch::Health => Payload::Health,
        })
    }
}

/// The fetches the active view of `state` needs.  They are independent of
/// each other and are issued together.
pub fn plan(state: &ViewState, config: &Config) -> Vec<Fetch> {
    match state.active {
        ViewId::Dashboard => vec![
            Fetch::Kpis,
            Fetch::GenreStats,
            Fetch::TopMovies {
                genre: None,
                limit: config.top_limit,
            },
        ],
        ViewId::Movies => vec![Fetch::Movies {
            query: state.movies.clone(),
            per_page: config.page_size,
        }],
        ViewId::Statistics => vec![Fetch::GenreStats],
        ViewId::Audience => vec![
            Fetch::AudienceProfile {
                genre: state.audience_genre.clone(),
            },
            Fetch::TopMovies {
                genre: state.audience_filter().map(Arc::from),
                limit: config.top_limit,
            },
        ],
        ViewId::Studio => vec![Fetch::GenreStats],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NavigationRequest;

    #[test]
    fn audience_plans_profile_and_vanguard() {
        let mut state = ViewState::default();
        state.apply(&NavigationRequest::new(ViewId::Audience).genre("Horror"));
        let fetches = plan(&state, &Config::default());
        assert_eq!(fetches.len(), 2);

        let requests: Vec<_> = fetches.iter().map(Fetch::request).collect();
        assert_eq!(requests[0].get_query("genre"), Some("Horror"));
        assert_eq!(requests[1].endpoint(), Endpoint::TopMovies);
        assert_eq!(requests[1].get_query("genre"), Some("Horror"));
        assert_eq!(requests[1].get_query("limit"), Some("10"));
    }

    #[test]
    fn all_genres_audience_is_unfiltered() {
        let mut state = ViewState::default();
        state.apply(&ViewId::Audience.into());
        let fetches = plan(&state, &Config::default());
        assert_eq!(fetches[0].request().get_query("genre"), Some("All"));
        assert_eq!(fetches[1].request().get_query("genre"), None);
    }

    #[test]
    fn movies_plan_carries_the_query() {
        let mut state = ViewState::default();
        state.apply(&NavigationRequest::new(ViewId::Movies).search("matrix").page(3));
        let request = plan(&state, &Config::default())[0].request();
        assert_eq!(request.get_query("page"), Some("3"));
        assert_eq!(request.get_query("per_page"), Some("12"));
        assert_eq!(request.get_query("search"), Some("matrix"));
        assert_eq!(request.get_query("genre"), None);
    }
}
