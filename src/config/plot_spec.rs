//! The closed set of result descriptors driving the chart run.

use lazy_static::lazy_static;

use crate::analysis::resample::{Frequency, Reducer};
use crate::config::constants::{MWH_2_MMCF, MWH_PRICE_2_MMBTU_PRICE};
use crate::data::accessors;
use crate::models::network::GasNetwork;
use crate::models::table::{DataError, ResultData};

pub type Accessor = fn(&GasNetwork) -> Result<ResultData, DataError>;

/// Which figure layout a result renders with. Must agree with the variant the
/// accessor returns; the runner checks and refuses mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One sub-chart per period, stacked vertically.
    Series,
    /// One row per period, imports left, exports right.
    Trade,
}

/// Immutable description of one result type.
pub struct PlotSpec {
    pub name: &'static str,
    pub nice_name: &'static str,
    pub unit: &'static str,
    pub converter: f64,
    pub getter: Accessor,
    pub chart: ChartKind,
    pub resample: Option<Frequency>,
    pub resample_func: Option<Reducer>,
    pub plot_by_month: bool,
}

lazy_static! {
    /// All result types this tool knows how to chart.
    pub static ref PLOT_SPECS: Vec<PlotSpec> = vec![
        PlotSpec {
            name: "fuel_price",
            nice_name: "State Level Natural Gas Price",
            unit: "$/MMBTU",
            converter: MWH_PRICE_2_MMBTU_PRICE,
            getter: accessors::gas_price,
            chart: ChartKind::Series,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Mean),
            plot_by_month: false,
        },
        PlotSpec {
            name: "demand",
            nice_name: "Natural Gas Demand",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::gas_demand,
            chart: ChartKind::Series,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Mean),
            plot_by_month: true,
        },
        PlotSpec {
            name: "processing",
            nice_name: "Natural Gas Processed",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::gas_processing,
            chart: ChartKind::Series,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Sum),
            plot_by_month: true,
        },
        PlotSpec {
            name: "linepack",
            nice_name: "Natural Gas in Linepack",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::linepack,
            chart: ChartKind::Series,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Sum),
            plot_by_month: true,
        },
        PlotSpec {
            name: "storage",
            nice_name: "Natural Gas in Underground Storage",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::underground_storage,
            chart: ChartKind::Series,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Sum),
            plot_by_month: true,
        },
        PlotSpec {
            name: "domestic_trade",
            nice_name: "Natural Gas Traded Domestically",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::domestic_trade,
            chart: ChartKind::Trade,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Mean),
            plot_by_month: true,
        },
        PlotSpec {
            name: "international_trade",
            nice_name: "Natural Gas Traded Internationally",
            unit: "MMCF",
            converter: MWH_2_MMCF,
            getter: accessors::international_trade,
            chart: ChartKind::Trade,
            resample: Some(Frequency::Daily),
            resample_func: Some(Reducer::Mean),
            plot_by_month: true,
        },
    ];
}
