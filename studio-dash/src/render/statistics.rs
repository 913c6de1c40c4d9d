use studio_core::model::GenreStat;

use super::{color_for, money_m, ratio, RenderCtx};
use crate::{
    action::Action,
    chart::{Axis, ChartConfig, ChartKind, Dataset, DrillDown, Series},
    data::{chart_ids, NavigationRequest, ViewId},
    sink::{Patch, Row, Slot},
};

pub fn genres(ctx: &mut RenderCtx, stats: &[GenreStat]) {
    if stats.is_empty() {
        ctx.empty_charts(ViewId::Statistics, Slot::GenreShareChart, "No genre data available");
        ctx.patch(Patch::ShowEmpty(Slot::GenreTable, "No genre data available".into()));
        return;
    }
    ctx.patch(Patch::HideEmpty(Slot::GenreShareChart));
    ctx.chart(chart_ids::GENRE_SHARE, genre_share(stats));
    ctx.patch(Patch::ReplaceRows(
        Slot::GenreTable,
        stats.iter().map(genre_row).collect(),
    ));
}

fn genre_share(stats: &[GenreStat]) -> ChartConfig {
    ChartConfig::new(ChartKind::Doughnut)
        .labels(stats.iter().map(|stat| stat.genre.clone()))
        .dataset(Dataset {
            label: "Movies".into(),
            series: Series::Values(stats.iter().map(|stat| stat.count as f64).collect()),
            colors: stats.iter().map(|stat| color_for(&stat.genre)).collect(),
            axis: Axis::Primary,
        })
        .drill_down(DrillDown::AudienceByGenre)
}

fn genre_row(stat: &GenreStat) -> Row {
    Row {
        cells: vec![
            stat.genre.to_string(),
            stat.count.to_string(),
            money_m(stat.avg_budget),
            money_m(stat.avg_revenue),
            ratio(stat.avg_roi),
        ],
        on_click: Some(Action::Navigate(
            NavigationRequest::new(ViewId::Audience).genre(stat.genre.clone()),
        )),
    }
}
