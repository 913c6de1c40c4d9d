use std::sync::Arc;

use itertools::Itertools;
use studio_core::{
    demo,
    model::{GenreStat, Risk, SimilarFilm, Simulation},
    webapi::{decode, Endpoint},
};

use super::{money_m, open_movie, ratio, RenderCtx};
use crate::{
    chart::{Axis, ChartConfig, ChartKind, Dataset, Series},
    data::{chart_ids, Promise, SimulationState},
    sink::{Card, Patch, Slot, Tone},
};

const MATCH_COLORS: [&str; 2] = ["#a855f7", "#27272a"];

/// Genre selector of the pitch form, alphabetical.
pub fn genre_options(ctx: &mut RenderCtx, stats: &[GenreStat]) {
    let options: Vec<Arc<str>> = stats
        .iter()
        .map(|stat| stat.genre.clone())
        .sorted()
        .dedup()
        .collect();
    ctx.patch(Patch::ReplaceOptions(Slot::GenreOptions, options));
}

pub fn pitch_invalid(ctx: &mut RenderCtx, invalid: bool) {
    ctx.patch(Patch::SetInvalid(Slot::PitchInput, invalid));
}

/// Bind the simulator panel to its state.  A failed simulation still shows
/// a result, the demo one.
pub fn simulator(ctx: &mut RenderCtx, state: &SimulationState) {
    let loading = state.is_pending();
    ctx.enabled(Slot::AnalyzeButton, !loading);
    ctx.text(
        Slot::AnalyzeButton,
        if loading { "Analyzing..." } else { "Analyze Concept" },
    );

    match state {
        Promise::Empty | Promise::Deferred(_) => hide_result(ctx),
        Promise::Resolved(simulation) => result(ctx, simulation),
        Promise::Rejected(_) => match demo_simulation() {
            Some(simulation) => result(ctx, &simulation),
            None => hide_result(ctx),
        },
    }
}

fn demo_simulation() -> Option<Simulation> {
    decode(demo::get(Endpoint::Simulate))
        .map_err(|err| log::error!("demo simulation does not decode: {err}"))
        .ok()
}

fn hide_result(ctx: &mut RenderCtx) {
    ctx.visible(Slot::SimResult, false);
    ctx.charts.teardown(chart_ids::AUDIENCE_MATCH);
}

fn result(ctx: &mut RenderCtx, simulation: &Simulation) {
    ctx.visible(Slot::SimResult, true);
    ctx.text(Slot::SimScore, format!("{}%", simulation.viability));
    ctx.text(Slot::SimRevenue, money_m(simulation.est_revenue_m));
    ctx.text(Slot::SimRoi, ratio(simulation.est_roi));
    ctx.text(Slot::SimRisk, risk_label(simulation.risk));
    ctx.patch(Patch::SetTone(Slot::SimRisk, risk_tone(simulation.risk)));
    ctx.text(
        Slot::SimGenre,
        format!("Predicted Genre: {}", simulation.predicted_genre),
    );

    match simulation.audience_match {
        Some(share) => {
            let share = share.clamp(0.0, 100.0);
            let config = ChartConfig::new(ChartKind::Doughnut)
                .labels(["Match".into(), "Other".into()])
                .dataset(Dataset {
                    label: "Audience match (%)".into(),
                    series: Series::Values(vec![share, 100.0 - share]),
                    colors: MATCH_COLORS.to_vec(),
                    axis: Axis::Primary,
                });
            ctx.chart(chart_ids::AUDIENCE_MATCH, config);
        }
        None => {
            ctx.charts.teardown(chart_ids::AUDIENCE_MATCH);
        }
    }

    if simulation.similar_films.is_empty() {
        ctx.patch(Patch::ShowEmpty(Slot::SimFilms, "No similar films found".into()));
    } else {
        let cards = simulation.similar_films.iter().map(film_card).collect();
        ctx.patch(Patch::ReplaceCards(Slot::SimFilms, cards));
    }
}

fn risk_label(risk: Risk) -> &'static str {
    match risk {
        Risk::Low => "Low",
        Risk::Medium => "Medium",
        Risk::High => "High",
    }
}

fn risk_tone(risk: Risk) -> Tone {
    match risk {
        Risk::Low => Tone::Good,
        Risk::Medium => Tone::Warn,
        Risk::High => Tone::Caution,
    }
}

fn film_card(film: &SimilarFilm) -> Card {
    let movie = film.to_movie();
    let card = Card {
        title: movie.title_with_year(),
        subtitle: movie.genre_names().take(2).join(" · "),
        detail: match film.revenue_m {
            Some(revenue) => format!("{} revenue · {}% match", money_m(revenue), film.similarity),
            None => format!("{}% match", film.similarity),
        },
        poster: film.poster.clone(),
        on_click: open_movie(&movie),
    };
    card
}
