use itertools::Itertools;
use studio_core::model::Movie;

use super::{money_m, ratio, RenderCtx};
use crate::sink::{MovieDetail, Patch};

const NO_SYNOPSIS: &str = "No synopsis available for this title.";
const NOT_AVAILABLE: &str = "N/A";

pub fn show(ctx: &mut RenderCtx, movie: &Movie) {
    ctx.patch(Patch::ShowMovie(movie_detail(movie)));
}

pub fn hide(ctx: &mut RenderCtx) {
    ctx.patch(Patch::HideMovie);
}

pub fn movie_detail(movie: &Movie) -> MovieDetail {
    // Zero means unknown for the money columns.
    let amount = |value: f64, format: fn(f64) -> String| {
        if value > 0.0 {
            format(value)
        } else {
            NOT_AVAILABLE.to_string()
        }
    };
    MovieDetail {
        title: movie.title.to_string(),
        poster: movie.poster.clone(),
        genres: movie.genre_names().join(" · "),
        year: movie.year.map(|year| year.to_string()).unwrap_or_default(),
        overview: movie
            .overview
            .as_deref()
            .filter(|overview| !overview.trim().is_empty())
            .unwrap_or(NO_SYNOPSIS)
            .to_string(),
        budget: amount(movie.budget_m, money_m),
        revenue: amount(movie.revenue_m, money_m),
        roi: amount(movie.roi, ratio),
        // Ratings are a score, not an amount: unrated titles read "0.0".
        rating: if movie.vote_average > 0.0 {
            movie.vote_average.to_string()
        } else {
            "0.0".to_string()
        },
    }
}
