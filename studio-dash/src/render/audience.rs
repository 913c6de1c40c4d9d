use studio_core::model::{AudienceProfile, Movie, Segment};

use super::{money_m, ranking_row, ratio, RenderCtx};
use crate::{
    chart::{Axis, ChartConfig, ChartKind, Dataset, Series},
    data::{chart_ids, ViewId, ALL_GENRES},
    sink::{Patch, Slot},
};

const AGE_COLOR: &str = "#8b5cf6";
const GENDER_COLORS: [&str; 3] = ["#ec4899", "#3b82f6", "#a1a1aa"];

pub fn header(ctx: &mut RenderCtx, genre: &str) {
    let title = match genre {
        ALL_GENRES => "All Genres",
        genre => genre,
    };
    ctx.text(Slot::AudienceTitle, format!("Audience: {title}"));
}

pub fn profile(ctx: &mut RenderCtx, profile: &AudienceProfile) {
    ctx.text(Slot::AudienceAvgRoi, ratio(profile.avg_roi));
    ctx.text(Slot::AudienceAvgBudget, money_m(profile.avg_budget));
    ctx.text(Slot::AudienceMarketShare, format!("{}%", profile.market_share));

    if profile.age_groups.is_empty() && profile.gender_split.is_empty() {
        ctx.empty_charts(ViewId::Audience, Slot::AudienceCharts, "No audience data available");
        return;
    }
    ctx.patch(Patch::HideEmpty(Slot::AudienceCharts));
    segments(ctx, chart_ids::AUDIENCE_AGE, ChartKind::Bar, &profile.age_groups, &[AGE_COLOR]);
    segments(
        ctx,
        chart_ids::AUDIENCE_GENDER,
        ChartKind::Doughnut,
        &profile.gender_split,
        &GENDER_COLORS,
    );
}

fn segments(
    ctx: &mut RenderCtx,
    id: &str,
    kind: ChartKind,
    segments: &[Segment],
    colors: &[&'static str],
) {
    if segments.is_empty() {
        ctx.charts.teardown(id);
        return;
    }
    let config = ChartConfig::new(kind)
        .labels(segments.iter().map(|segment| segment.label.clone()))
        .dataset(Dataset {
            label: "Share (%)".into(),
            series: Series::Values(segments.iter().map(|segment| segment.share).collect()),
            colors: colors.to_vec(),
            axis: Axis::Primary,
        });
    ctx.chart(id, config);
}

/// Top movies of the selected genre.
pub fn vanguard(ctx: &mut RenderCtx, movies: &[Movie]) {
    if movies.is_empty() {
        ctx.patch(Patch::ShowEmpty(
            Slot::VanguardTable,
            "No movies found for this genre".into(),
        ));
        return;
    }
    ctx.patch(Patch::ReplaceRows(
        Slot::VanguardTable,
        movies.iter().map(ranking_row).collect(),
    ));
}
