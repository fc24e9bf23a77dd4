use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single row label: the modeled planning period plus the timestep within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub period: u32,
    pub timestep: NaiveDateTime,
}

impl Snapshot {
    pub fn new(period: u32, timestep: NaiveDateTime) -> Self {
        Self { period, timestep }
    }
}

/// A named series of values, one per snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Time-indexed table of named f64 series.
///
/// All columns share the same (period, timestep) row index. Duplicate column
/// names are allowed; raw accessor output may carry several technology
/// sub-series under one logical name, collapsed later by the aggregator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeTable {
    index: Vec<Snapshot>,
    columns: Vec<Column>,
}

impl TimeTable {
    /// A table with a row index but no columns yet.
    pub fn new(index: Vec<Snapshot>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), DataError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(DataError::LengthMismatch {
                name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// True when the table holds no data on either axis.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn index(&self) -> &[Snapshot] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Modeled periods in order of first appearance.
    pub fn periods(&self) -> Vec<u32> {
        let mut out = Vec::new();
        for snapshot in &self.index {
            if !out.contains(&snapshot.period) {
                out.push(snapshot.period);
            }
        }
        out
    }

    /// Rows matching the predicate, all columns carried along.
    pub fn filter<F>(&self, pred: F) -> TimeTable
    where
        F: Fn(&Snapshot) -> bool,
    {
        let keep: Vec<usize> = self
            .index
            .iter()
            .enumerate()
            .filter(|(_, snapshot)| pred(snapshot))
            .map(|(i, _)| i)
            .collect();
        TimeTable {
            index: keep.iter().map(|&i| self.index[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: keep.iter().map(|&i| c.values[i]).collect(),
                })
                .collect(),
        }
    }

    /// The sub-table for one modeled period.
    pub fn for_period(&self, period: u32) -> TimeTable {
        self.filter(|snapshot| snapshot.period == period)
    }

    /// Unit conversion: every value multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> TimeTable {
        TimeTable {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.iter().map(|v| v * factor).collect(),
                })
                .collect(),
        }
    }

    /// Smallest and largest value in the table, if any values exist.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for column in &self.columns {
            for &v in &column.values {
                range = Some(match range {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }
        }
        range
    }
}

/// Import and export tables for one region, always carried as a pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeTable {
    pub imports: TimeTable,
    pub exports: TimeTable,
}

impl TradeTable {
    pub fn new(index: Vec<Snapshot>) -> Self {
        Self {
            imports: TimeTable::new(index.clone()),
            exports: TimeTable::new(index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.exports.is_empty()
    }
}

/// One result type's data, tagged at the accessor boundary.
///
/// Plain quantities carry one table per region; trade carries an
/// import/export pair per region. Downstream code matches on the variant
/// instead of probing the shape of the data.
#[derive(Debug, Clone)]
pub enum ResultData {
    Series(BTreeMap<String, TimeTable>),
    Trade(BTreeMap<String, TradeTable>),
}

/// A single region's slice of a [`ResultData`].
#[derive(Debug, Clone)]
pub enum RegionData {
    Series(TimeTable),
    Trade(TradeTable),
}

impl ResultData {
    pub fn region(&self, region: &str) -> Option<RegionData> {
        match self {
            ResultData::Series(map) => map.get(region).cloned().map(RegionData::Series),
            ResultData::Trade(map) => map.get(region).cloned().map(RegionData::Trade),
        }
    }
}

/// Errors raised while assembling or combining tables.
#[derive(Debug)]
pub enum DataError {
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    IndexMismatch {
        context: String,
    },
    UnknownBus {
        component: String,
        bus: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::LengthMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "series '{}' has {} values but the snapshot index has {}",
                name, actual, expected
            ),
            DataError::IndexMismatch { context } => {
                write!(f, "row indexes differ while combining {}", context)
            }
            DataError::UnknownBus { component, bus } => {
                write!(f, "component '{}' references unknown bus '{}'", component, bus)
            }
        }
    }
}

impl std::error::Error for DataError {}
