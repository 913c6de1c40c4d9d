use studio_core::model::{Movie, MoviePage};

use super::{open_movie, ratio, stars, RenderCtx};
use crate::{
    data::MoviesQuery,
    sink::{Card, Patch, Slot},
};

/// Header and pagination controls for `query`, before its page arrives.
/// "Next" stays disabled until we know whether there is a next page.
pub fn query(ctx: &mut RenderCtx, query: &MoviesQuery) {
    ctx.text(Slot::MoviesSearch, query.search.to_string());
    ctx.text(Slot::MoviesPage, format!("Page {}", query.page()));
    ctx.enabled(Slot::MoviesPrevious, query.has_previous());
    ctx.enabled(Slot::MoviesNext, false);
}

pub fn page(ctx: &mut RenderCtx, query: &MoviesQuery, page: &MoviePage) {
    ctx.text(Slot::MoviesTotal, format!("{} movies", page.total));
    ctx.enabled(Slot::MoviesNext, page.has_more);

    if page.movies.is_empty() {
        let message = if query.search.is_empty() {
            "No movies found".to_string()
        } else {
            format!("No movies match “{}”", query.search)
        };
        ctx.patch(Patch::ShowEmpty(Slot::MoviesGrid, message));
        return;
    }
    let cards = page.movies.iter().map(card).collect();
    ctx.patch(Patch::ReplaceCards(Slot::MoviesGrid, cards));
}

fn card(movie: &Movie) -> Card {
    let subtitle = [
        movie.year.map(|year| year.to_string()),
        movie.primary_genre().map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    Card {
        title: movie.title.to_string(),
        subtitle,
        detail: format!("{} · ROI {}", stars(movie.vote_average), ratio(movie.roi)),
        poster: movie.poster.clone(),
        on_click: open_movie(movie),
    }
}
