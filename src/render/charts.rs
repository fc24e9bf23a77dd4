//! Figure rendering with plotters. One PNG per call; parent directories are
//! created on demand so a save never fails on a missing directory.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;

use crate::config::constants::{FIG_HEIGHT, FIG_WIDTH};
use crate::models::table::{Snapshot, TimeTable, TradeTable};

const TITLE_AREA_HEIGHT: u32 = 40;
const CAPTION_FONT: (&str, i32) = ("sans-serif", 24);

/// One line color per series, reused cyclically.
const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn time_range(index: &[Snapshot]) -> (NaiveDateTime, NaiveDateTime) {
    let mut start = index[0].timestep;
    let mut end = index[0].timestep;
    for snapshot in index {
        start = start.min(snapshot.timestep);
        end = end.max(snapshot.timestep);
    }
    if start == end {
        end = end + Duration::hours(1);
    }
    (start, end)
}

fn padded(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Axes without data, so an empty result still yields a readable figure.
fn draw_blank<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

/// Line chart of every column of `table` on one set of axes.
fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    table: &TimeTable,
    caption: &str,
    unit: &str,
    y_range: Option<(f64, f64)>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (t0, t1) = time_range(table.index());
    let (y0, y1) = match y_range {
        Some(range) => range,
        None => padded(table.value_range()),
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(RangedDateTime::from(t0..t1), y0..y1)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|ts: &NaiveDateTime| ts.format("%b %d %H:%M").to_string())
        .y_desc(format!("({})", unit))
        .draw()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    for (i, column) in table.columns().iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                table
                    .index()
                    .iter()
                    .zip(&column.values)
                    .map(|(snapshot, &v)| (snapshot.timestep, v)),
                &color,
            ))
            .map_err(|e| anyhow::anyhow!("{}", e))?
            .label(column.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

/// Render a plain series result: one sub-chart per modeled period, stacked
/// vertically. An empty table still writes a single blank chart so every
/// expected output path is populated.
pub fn render_series(table: &TimeTable, title: &str, unit: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    if table.is_empty() {
        let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_blank(&root, title)?;
        root.present()?;
        return Ok(());
    }

    let periods = table.periods();
    let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT * periods.len() as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((periods.len(), 1));
    for (area, &period) in areas.iter().zip(&periods) {
        draw_lines(area, &table.for_period(period), title, unit, None)?;
    }
    root.present()?;
    Ok(())
}

/// Render a trade result: one row per modeled period, imports on the left,
/// exports on the right, with one shared y-range across the whole figure so
/// the two directions compare visually. A direction with no rows for a
/// period leaves that panel blank.
pub fn render_trade(trade: &TradeTable, title: &str, unit: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;

    let mut periods = trade.imports.periods();
    for period in trade.exports.periods() {
        if !periods.contains(&period) {
            periods.push(period);
        }
    }

    if periods.is_empty() || trade.is_empty() {
        let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_blank(&root, title)?;
        root.present()?;
        return Ok(());
    }

    let height = FIG_HEIGHT * periods.len() as u32 + TITLE_AREA_HEIGHT;
    let root = BitMapBackend::new(path, (FIG_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root
        .titled(title, ("sans-serif", 30))
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let areas = titled.split_evenly((periods.len(), 2));

    let y_range = padded(merge_ranges(
        trade.imports.value_range(),
        trade.exports.value_range(),
    ));

    for (row, &period) in periods.iter().enumerate() {
        let imports = trade.imports.for_period(period);
        if !imports.is_empty() {
            draw_lines(&areas[row * 2], &imports, "Imports", unit, Some(y_range))?;
        }
        let exports = trade.exports.for_period(period);
        if !exports.is_empty() {
            draw_lines(&areas[row * 2 + 1], &exports, "Exports", unit, Some(y_range))?;
        }
    }
    root.present()?;
    Ok(())
}

fn merge_ranges(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((alo, ahi)), Some((blo, bhi))) => Some((alo.min(blo), ahi.max(bhi))),
        (Some(r), None) | (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn table(periods: &[u32]) -> TimeTable {
        let mut index = Vec::new();
        for &period in periods {
            for hour in 0..24 {
                index.push(Snapshot::new(
                    period,
                    NaiveDate::from_ymd_opt(2030, 1, 1)
                        .unwrap()
                        .and_hms_opt(hour, 0, 0)
                        .unwrap(),
                ));
            }
        }
        let n = index.len();
        let mut t = TimeTable::new(index);
        t.push_column("a", (0..n).map(|i| i as f64).collect()).unwrap();
        t.push_column("b", (0..n).map(|i| (i * 2) as f64).collect())
            .unwrap();
        t
    }

    #[test]
    fn empty_table_still_writes_a_figure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");
        render_series(&TimeTable::default(), "Nothing here", "MMCF", &path).unwrap();
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn one_subchart_per_period() {
        let dir = tempdir().unwrap();
        let single = dir.path().join("single.png");
        let double = dir.path().join("double.png");
        render_series(&table(&[2030]), "Demand", "MMCF", &single).unwrap();
        render_series(&table(&[2030, 2040]), "Demand", "MMCF", &double).unwrap();
        // The two-period figure is twice as tall, so strictly larger on disk.
        assert!(
            fs::metadata(&double).unwrap().len() > fs::metadata(&single).unwrap().len() / 2
        );
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("CA").join("natural_gas").join("demand.png");
        render_series(&table(&[2030]), "Demand", "MMCF", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn trade_with_one_blank_direction_renders() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trade.png");
        let trade = TradeTable {
            imports: table(&[2030]),
            exports: TimeTable::default(),
        };
        render_trade(&trade, "Trade", "MMCF", &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn fully_empty_trade_still_writes_a_figure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty_trade.png");
        render_trade(&TradeTable::default(), "Trade", "MMCF", &path).unwrap();
        assert!(path.exists());
    }
}
