//! The batch loop: every (result type x region) pair flows through
//! accessor -> aggregate -> convert -> resample -> render, with the optional
//! monthly detail pass on the un-resampled aggregate.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::Month;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::analysis::aggregate;
use crate::analysis::months::{split_by_month, MONTHS};
use crate::analysis::resample::{resample, Frequency, Reducer};
use crate::config::constants::SYSTEM_REGION;
use crate::config::plot_spec::{ChartKind, PlotSpec, PLOT_SPECS};
use crate::models::network::GasNetwork;
use crate::models::table::{RegionData, TradeTable};
use crate::output::layout;
use crate::render::charts;
use crate::utils::csv_export;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub export_csv: bool,
}

/// What a run actually did, for the final report and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub figures_written: usize,
    pub results_skipped: usize,
    pub regions_skipped: usize,
}

/// Generate every requested chart from the solved network.
///
/// A result type with no requested output and a region with no data are both
/// logged and skipped; genuine data or rendering errors propagate and end the
/// run.
pub fn generate_charts(
    network: &GasNetwork,
    outputs: &[PathBuf],
    options: &RunOptions,
) -> Result<RunSummary> {
    let mut regions = network.regions();
    regions.push(SYSTEM_REGION.to_string());

    let expected = layout::expected_figures(outputs, &regions);
    let mut summary = RunSummary::default();

    let bar = ProgressBar::new((PLOT_SPECS.len() * regions.len()) as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("progress template is valid"),
    );

    for spec in PLOT_SPECS.iter() {
        let Some(region_paths) = expected.get(spec.name) else {
            warn!("Not expecting {} natural gas chart", spec.name);
            summary.results_skipped += 1;
            bar.inc(regions.len() as u64);
            continue;
        };

        let data = (spec.getter)(network)?;

        for region in &regions {
            bar.set_message(format!("{} {}", region, spec.name));
            bar.inc(1);

            let region_data = if region.as_str() == SYSTEM_REGION {
                aggregate::system_total(&data)?
            } else {
                match data.region(region) {
                    Some(d) => d,
                    None => {
                        info!("No {} data for {}", spec.nice_name, region);
                        summary.regions_skipped += 1;
                        continue;
                    }
                }
            };

            let Some(save_path) = region_paths.get(region) else {
                info!("No output path for {} {}", region, spec.name);
                summary.regions_skipped += 1;
                continue;
            };

            let prepared = aggregate::prepare(&region_data, spec.converter);

            let (title, headline) = match spec.resample {
                Some(freq) => (
                    format!("{} {} resampled to {}", region, spec.nice_name, freq),
                    resample_region(&prepared, freq, spec.resample_func.unwrap_or(Reducer::Mean)),
                ),
                None => (format!("{} {}", region, spec.nice_name), prepared.clone()),
            };

            render_region(spec, &headline, &title, save_path)?;
            if options.export_csv {
                export_region(&headline, save_path)?;
            }
            summary.figures_written += 1;

            if !spec.plot_by_month {
                continue;
            }

            // Monthly detail stays on the un-resampled aggregate.
            for &month in &MONTHS {
                let sliced = split_region(&prepared, month);
                let month_title =
                    format!("{} {} {}", region, spec.nice_name, month.name());
                let month_path = layout::monthly_path(save_path, spec.name, month.name());
                render_region(spec, &sliced, &month_title, &month_path)?;
                summary.figures_written += 1;
            }
        }
    }

    bar.finish_and_clear();
    info!(
        figures = summary.figures_written,
        results_skipped = summary.results_skipped,
        regions_skipped = summary.regions_skipped,
        "chart run complete"
    );
    Ok(summary)
}

fn resample_region(data: &RegionData, freq: Frequency, reducer: Reducer) -> RegionData {
    match data {
        RegionData::Series(table) => RegionData::Series(resample(table, freq, reducer)),
        RegionData::Trade(trade) => RegionData::Trade(TradeTable {
            imports: resample(&trade.imports, freq, reducer),
            exports: resample(&trade.exports, freq, reducer),
        }),
    }
}

fn split_region(data: &RegionData, month: Month) -> RegionData {
    match data {
        RegionData::Series(table) => RegionData::Series(split_by_month(table, month)),
        RegionData::Trade(trade) => RegionData::Trade(TradeTable {
            imports: split_by_month(&trade.imports, month),
            exports: split_by_month(&trade.exports, month),
        }),
    }
}

fn render_region(spec: &PlotSpec, data: &RegionData, title: &str, path: &Path) -> Result<()> {
    match (spec.chart, data) {
        (ChartKind::Series, RegionData::Series(table)) => {
            charts::render_series(table, title, spec.unit, path)
        }
        (ChartKind::Trade, RegionData::Trade(trade)) => {
            charts::render_trade(trade, title, spec.unit, path)
        }
        _ => bail!(
            "accessor for '{}' returned data that does not match its {:?} chart",
            spec.name,
            spec.chart
        ),
    }
}

fn export_region(data: &RegionData, figure_path: &Path) -> Result<()> {
    match data {
        RegionData::Series(table) => {
            csv_export::export_table(table, figure_path)?;
        }
        RegionData::Trade(trade) => {
            csv_export::export_trade(trade, figure_path)?;
        }
    }
    Ok(())
}
