use crate::domain::model::{Percentile, ReferenceCurve, ReferenceCurveSet};
use serde::Serialize;

const MIN_Y_FLOOR: f64 = 2.0;
const MAX_Y_CEILING: f64 = 16.0;
const GRID_STEP_MONTHS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub percentile: Percentile,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
}

/// Everything a renderer needs to draw the three centile lines and the
/// assessed point on a months × kg grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
    pub point: Option<ChartPoint>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_grid: Vec<f64>,
}

fn series_color(percentile: Percentile) -> &'static str {
    match percentile {
        Percentile::P15 => "#ffb74d",
        Percentile::P50 => "#64B5F6",
        Percentile::P85 => "#81c784",
    }
}

fn to_series(percentile: Percentile, curve: &ReferenceCurve) -> ChartSeries {
    ChartSeries {
        percentile,
        color: series_color(percentile),
        points: curve
            .points()
            .iter()
            .map(|p| ChartPoint {
                x: f64::from(p.age_months),
                y: p.weight_kg,
            })
            .collect(),
    }
}

pub fn chart_data(set: &ReferenceCurveSet, point: Option<ChartPoint>) -> ChartData {
    let series: Vec<ChartSeries> = Percentile::ALL
        .iter()
        .map(|&percentile| to_series(percentile, set.curve(percentile)))
        .collect();

    // The y axis always spans at least 2..16 kg so charts stay comparable.
    let (min_y, max_y) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.y))
        .fold((MIN_Y_FLOOR, MAX_Y_CEILING), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    let first = set.p50.first().age_months;
    let last = set.p50.last().age_months;
    let x_grid = (first..=last)
        .step_by(GRID_STEP_MONTHS as usize)
        .map(f64::from)
        .collect();

    ChartData {
        series,
        point,
        x_range: (f64::from(first), f64::from(last)),
        y_range: (min_y, max_y),
        x_grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::reference_set;
    use crate::domain::model::Sex;

    #[test]
    fn test_chart_has_three_full_series() {
        let chart = chart_data(reference_set(Sex::Female), None);
        assert_eq!(chart.series.len(), 3);
        for series in &chart.series {
            assert_eq!(series.points.len(), 25);
            assert_eq!(series.points[24].x, 24.0);
        }
        assert_eq!(chart.series[0].percentile, Percentile::P15);
        assert_eq!(chart.x_range, (0.0, 24.0));
    }

    #[test]
    fn test_y_range_keeps_default_span() {
        let chart = chart_data(reference_set(Sex::Male), None);
        assert_eq!(chart.y_range, (2.0, 16.0));
    }

    #[test]
    fn test_x_grid_every_four_months() {
        let chart = chart_data(reference_set(Sex::Male), None);
        assert_eq!(chart.x_grid, vec![0.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0]);
    }

    #[test]
    fn test_point_is_carried_through() {
        let point = ChartPoint { x: 6.0, y: 7.5 };
        let chart = chart_data(reference_set(Sex::Male), Some(point));
        assert_eq!(chart.point, Some(point));
    }
}
