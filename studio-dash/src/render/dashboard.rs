use itertools::Itertools;
use studio_core::model::{GenreStat, Kpis, Movie};

use super::{color_for, ranking_row, RenderCtx};
use crate::{
    chart::{Axis, BubblePoint, ChartConfig, ChartKind, Dataset, DrillDown, Series},
    data::{chart_ids, RoiChartMode, ViewId},
    sink::{Patch, Slot},
};

const RANKED_GENRES: usize = 12;
const MIN_BUBBLE_RADIUS: f64 = 6.0;
const BUDGET_COLOR: &str = "#64748b";

pub fn kpis(ctx: &mut RenderCtx, kpis: &Kpis) {
    ctx.text(Slot::KpiMovies, kpis.total_movies.to_string());
    ctx.text(Slot::KpiRevenue, format!("${}B", kpis.total_revenue_b));
    ctx.text(Slot::KpiRoi, format!("{}x", kpis.avg_roi));
    ctx.text(Slot::KpiRating, format!("{}/10", kpis.avg_rating));
}

/// Genres by average ROI, best first.
pub fn rank_genres(stats: &[GenreStat]) -> Vec<&GenreStat> {
    stats
        .iter()
        .sorted_by(|a, b| b.avg_roi.total_cmp(&a.avg_roi))
        .take(RANKED_GENRES)
        .collect()
}

pub fn genre_charts(ctx: &mut RenderCtx, stats: &[GenreStat], mode: RoiChartMode) {
    let ranked = rank_genres(stats);
    if ranked.is_empty() {
        ctx.empty_charts(ViewId::Dashboard, Slot::RoiCharts, "No genre data available");
        return;
    }
    ctx.patch(Patch::HideEmpty(Slot::RoiCharts));
    ctx.chart(chart_ids::ROI_BAR, roi_bar(&ranked));
    ctx.chart(chart_ids::ROI_BUBBLE, roi_bubble(&ranked));
    roi_chart_mode(ctx, mode);
}

pub fn roi_chart_mode(ctx: &mut RenderCtx, mode: RoiChartMode) {
    ctx.visible(Slot::RoiBarChart, mode == RoiChartMode::Bar);
    ctx.visible(Slot::RoiBubbleChart, mode == RoiChartMode::Bubble);
}

fn roi_bar(ranked: &[&GenreStat]) -> ChartConfig {
    ChartConfig::new(ChartKind::Bar)
        .labels(ranked.iter().map(|stat| stat.genre.clone()))
        .dataset(Dataset {
            label: "ROI (x)".into(),
            series: Series::Values(ranked.iter().map(|stat| stat.avg_roi).collect()),
            colors: ranked.iter().map(|stat| color_for(&stat.genre)).collect(),
            axis: Axis::Primary,
        })
        .dataset(Dataset {
            label: "Avg Budget ($M)".into(),
            series: Series::Values(ranked.iter().map(|stat| stat.avg_budget).collect()),
            colors: vec![BUDGET_COLOR],
            axis: Axis::Secondary,
        })
        .drill_down(DrillDown::AudienceByGenre)
}

fn roi_bubble(ranked: &[&GenreStat]) -> ChartConfig {
    ranked
        .iter()
        .fold(ChartConfig::new(ChartKind::Bubble), |config, stat| {
            config.dataset(Dataset {
                label: stat.genre.clone(),
                series: Series::Bubbles(vec![BubblePoint {
                    x: stat.avg_budget,
                    y: stat.avg_roi,
                    r: (stat.avg_revenue / 60.0).max(MIN_BUBBLE_RADIUS),
                }]),
                colors: vec![color_for(&stat.genre)],
                axis: Axis::Primary,
            })
        })
        .drill_down(DrillDown::AudienceByGenre)
}

pub fn top_movies(ctx: &mut RenderCtx, movies: &[Movie]) {
    if movies.is_empty() {
        ctx.patch(Patch::ShowEmpty(Slot::TopMoviesTable, "No movies found".into()));
        return;
    }
    let rows = movies
        .iter()
        .map(|movie| {
            let mut row = ranking_row(movie);
            if movie.roi >= 3.0 {
                row.cells[2] = format!("▲ {}", row.cells[2]);
            }
            row
        })
        .collect();
    ctx.patch(Patch::ReplaceRows(Slot::TopMoviesTable, rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(genre: &str, roi: f64, revenue: f64) -> GenreStat {
        GenreStat {
            genre: genre.into(),
            avg_budget: 10.0,
            avg_revenue: revenue,
            avg_roi: roi,
            count: 1,
        }
    }

    #[test]
    fn genres_rank_by_roi_and_keep_twelve() {
        let stats: Vec<_> = (0..15).map(|i| stat(&format!("G{i}"), i as f64, 60.0)).collect();
        let ranked = rank_genres(&stats);
        assert_eq!(ranked.len(), 12);
        assert_eq!(&*ranked[0].genre, "G14");
        assert_eq!(&*ranked[11].genre, "G3");
    }

    #[test]
    fn bubble_radius_has_a_floor() {
        let stats = [stat("Horror", 5.3, 96.0), stat("Action", 3.2, 1200.0)];
        let config = roi_bubble(&rank_genres(&stats));
        let radii: Vec<f64> = config
            .datasets
            .iter()
            .map(|d| match &d.series {
                Series::Bubbles(points) => points[0].r,
                Series::Values(_) => unreachable!(),
            })
            .collect();
        assert_eq!(radii, vec![6.0, 20.0]);
    }
}
