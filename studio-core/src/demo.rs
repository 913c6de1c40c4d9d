//! Static substitute datasets shown when the backend cannot answer.
//!
//! Every dataset is the `data` member of a successful response for its
//! endpoint and decodes into the same type from [`crate::model`].

use serde_json::{json, Value};

use crate::webapi::Endpoint;

/// Demo `data` payload for `endpoint`.
pub fn get(endpoint: Endpoint) -> Value {
    match endpoint {
        Endpoint::Kpis => kpis(),
        Endpoint::GenreStats => genre_stats(),
        Endpoint::TopMovies => json!(top_movies()),
        Endpoint::AudienceProfile => audience_profile(),
        Endpoint::Movies => json!({
            "movies": top_movies(),
            "total": top_movies().len(),
            "has_more": false,
        }),
        Endpoint::Simulate => simulation(),
        Endpoint::Health => json!({ "healthy": false }),
    }
}

fn kpis() -> Value {
    json!({
        "total_movies": 1284,
        "total_revenue_b": 4.7,
        "avg_roi": 3.2,
        "avg_rating": 7.1,
    })
}

fn genre_stats() -> Value {
    json!([
        { "genre": "Horror", "avg_budget": 18.0, "avg_revenue": 96.0, "avg_roi": 5.3, "count": 150 },
        { "genre": "Animation", "avg_budget": 95.0, "avg_revenue": 410.0, "avg_roi": 4.3, "count": 200 },
        { "genre": "Sci-Fi", "avg_budget": 142.0, "avg_revenue": 485.0, "avg_roi": 3.4, "count": 180 },
        { "genre": "Comedy", "avg_budget": 42.0, "avg_revenue": 135.0, "avg_roi": 3.2, "count": 300 },
        { "genre": "Action", "avg_budget": 165.0, "avg_revenue": 520.0, "avg_roi": 3.2, "count": 350 },
        { "genre": "Drama", "avg_budget": 38.0, "avg_revenue": 112.0, "avg_roi": 2.9, "count": 400 },
    ])
}

fn top_movies() -> Vec<Value> {
    vec![
        json!({
            "title": "Paranormal Activity", "year": 2007, "genres": "Horror|Mystery",
            "budget_m": 0.015, "revenue_m": 193.4, "roi": 12893.0, "vote_average": 5.9,
            "overview": "A young couple is haunted by a supernatural presence in their home.",
        }),
        json!({
            "title": "Get Out", "year": 2017, "genres": "Horror|Mystery|Thriller",
            "budget_m": 4.5, "revenue_m": 255.4, "roi": 56.8, "vote_average": 7.6,
            "overview": "A young man uncovers a disturbing secret when he meets his girlfriend's family.",
        }),
        json!({
            "title": "Toy Story", "year": 1995, "genres": "Animation|Comedy|Family",
            "budget_m": 30.0, "revenue_m": 373.6, "roi": 12.5, "vote_average": 7.9,
        }),
        json!({
            "title": "The Matrix", "year": 1999, "genres": "Action|Sci-Fi",
            "budget_m": 63.0, "revenue_m": 463.5, "roi": 7.4, "vote_average": 8.2,
        }),
        json!({
            "title": "Inception", "year": 2010, "genres": "Action|Sci-Fi|Adventure",
            "budget_m": 160.0, "revenue_m": 825.5, "roi": 5.2, "vote_average": 8.4,
        }),
    ]
}

fn audience_profile() -> Value {
    json!({
        "genre": "All",
        "avg_roi": 3.2,
        "avg_budget": 84.0,
        "market_share": 100.0,
        "age_groups": [
            { "label": "18-24", "share": 31.0 },
            { "label": "25-34", "share": 34.0 },
            { "label": "35-44", "share": 19.0 },
            { "label": "45+", "share": 16.0 },
        ],
        "gender_split": [
            { "label": "Female", "share": 48.0 },
            { "label": "Male", "share": 50.0 },
            { "label": "Other", "share": 2.0 },
        ],
    })
}

fn simulation() -> Value {
    json!({
        "viability": 79,
        "risk": "Medium",
        "predicted_genre": "Sci-Fi",
        "est_revenue_m": 310.0,
        "est_roi": 2.6,
        "audience_match": 82.0,
        "similar_films": [],
    })
}
