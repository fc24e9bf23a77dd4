//! Downsampling timestep-level series to a coarser calendar frequency.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::table::{Snapshot, TimeTable};

/// Target frequency for resampling, a small set of calendar-duration codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Hours(u32),
}

impl Frequency {
    /// Start of the bucket containing `timestep`. Weekly buckets start on
    /// Monday; hourly buckets are aligned to midnight.
    fn bucket_start(&self, timestep: NaiveDateTime) -> NaiveDateTime {
        let midnight = timestep
            .date()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time");
        match self {
            Frequency::Daily => midnight,
            Frequency::Weekly => {
                midnight - Duration::days(timestep.weekday().num_days_from_monday() as i64)
            }
            Frequency::Hours(step) => {
                let step = (*step).max(1);
                let hour = timestep.hour() - timestep.hour() % step;
                timestep
                    .date()
                    .and_hms_opt(hour, 0, 0)
                    .expect("aligned hour is always a valid time")
            }
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "D"),
            Frequency::Weekly => write!(f, "W"),
            Frequency::Hours(step) => write!(f, "{}h", step),
        }
    }
}

/// How values inside one resample bucket collapse to a single value.
/// Point-in-time quantities (prices) average; flow volumes accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reducer {
    Mean,
    Sum,
}

impl Reducer {
    fn apply(&self, values: &[f64]) -> f64 {
        let total: f64 = values.iter().sum();
        match self {
            Reducer::Sum => total,
            Reducer::Mean => total / values.len() as f64,
        }
    }
}

/// Regroup timestep rows into `frequency` buckets and reduce each bucket,
/// independently per modeled period. The bucket key carries the period, so a
/// resample window never crosses a period boundary. Empty tables come back
/// unchanged.
pub fn resample(table: &TimeTable, frequency: Frequency, reducer: Reducer) -> TimeTable {
    if table.is_empty() {
        return table.clone();
    }

    // (period, bucket start) -> original row positions
    let mut buckets: BTreeMap<(u32, NaiveDateTime), Vec<usize>> = BTreeMap::new();
    for (row, snapshot) in table.index().iter().enumerate() {
        let key = (snapshot.period, frequency.bucket_start(snapshot.timestep));
        buckets.entry(key).or_default().push(row);
    }

    let index: Vec<Snapshot> = buckets
        .keys()
        .map(|&(period, start)| Snapshot::new(period, start))
        .collect();
    let mut out = TimeTable::new(index);
    for column in table.columns() {
        let values: Vec<f64> = buckets
            .values()
            .map(|rows| {
                let window: Vec<f64> = rows.iter().map(|&r| column.values[r]).collect();
                reducer.apply(&window)
            })
            .collect();
        out.push_column(column.name.clone(), values)
            .expect("one value per bucket");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn hourly_table(periods: &[u32]) -> TimeTable {
        // Two days of 3-hourly data per period, overlapping timestamps across
        // periods but distinct period labels.
        let mut index = Vec::new();
        for &period in periods {
            for day in 1..=2 {
                for hour in (0..24).step_by(3) {
                    index.push(Snapshot::new(period, ts(day, hour)));
                }
            }
        }
        let n = index.len();
        let mut table = TimeTable::new(index);
        table
            .push_column("flow", (0..n).map(|i| i as f64).collect())
            .unwrap();
        table
    }

    #[test]
    fn daily_sum_matches_direct_window_sums() {
        let table = hourly_table(&[2030]);
        let resampled = resample(&table, Frequency::Daily, Reducer::Sum);
        assert_eq!(resampled.num_rows(), 2);

        let direct_day1: f64 = (0..8).map(|i| i as f64).sum();
        let direct_day2: f64 = (8..16).map(|i| i as f64).sum();
        assert_eq!(resampled.columns()[0].values, vec![direct_day1, direct_day2]);

        // Re-summing the resampled rows equals summing every original row.
        let total: f64 = resampled.columns()[0].values.iter().sum();
        let original: f64 = table.columns()[0].values.iter().sum();
        assert_eq!(total, original);
    }

    #[test]
    fn windows_never_cross_period_boundaries() {
        let table = hourly_table(&[2030, 2040]);
        let resampled = resample(&table, Frequency::Daily, Reducer::Sum);
        // Two days per period, two periods: four buckets, not two.
        assert_eq!(resampled.num_rows(), 4);
        assert_eq!(resampled.periods(), vec![2030, 2040]);

        let per_period: f64 = resampled
            .for_period(2030)
            .columns()[0]
            .values
            .iter()
            .sum();
        let direct: f64 = (0..16).map(|i| i as f64).sum();
        assert_eq!(per_period, direct);
    }

    #[test]
    fn mean_reducer_averages_each_bucket() {
        let mut table = TimeTable::new(vec![
            Snapshot::new(2030, ts(1, 0)),
            Snapshot::new(2030, ts(1, 6)),
            Snapshot::new(2030, ts(2, 0)),
        ]);
        table.push_column("price", vec![4.0, 6.0, 10.0]).unwrap();
        let resampled = resample(&table, Frequency::Daily, Reducer::Mean);
        assert_eq!(resampled.columns()[0].values, vec![5.0, 10.0]);
    }

    #[test]
    fn bucket_label_is_bucket_start() {
        let table = hourly_table(&[2030]);
        let resampled = resample(&table, Frequency::Daily, Reducer::Sum);
        assert_eq!(resampled.index()[0].timestep, ts(1, 0));
        assert_eq!(resampled.index()[1].timestep, ts(2, 0));
    }

    #[test]
    fn weekly_buckets_start_monday() {
        // 2030-01-07 is a Monday.
        let mut table = TimeTable::new(vec![
            Snapshot::new(2030, ts(8, 0)),
            Snapshot::new(2030, ts(9, 12)),
        ]);
        table.push_column("x", vec![1.0, 2.0]).unwrap();
        let resampled = resample(&table, Frequency::Weekly, Reducer::Sum);
        assert_eq!(resampled.num_rows(), 1);
        assert_eq!(resampled.index()[0].timestep, ts(7, 0));
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let empty = TimeTable::default();
        assert_eq!(resample(&empty, Frequency::Daily, Reducer::Sum), empty);
    }
}
