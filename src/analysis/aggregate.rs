//! Pure table aggregation: collapsing duplicate column names and summing
//! per-region tables into the system-wide total.

use std::collections::BTreeMap;

use crate::models::table::{DataError, RegionData, ResultData, TimeTable, TradeTable};

/// Sum columns sharing a name, preserving the row index and first-appearance
/// column order. Tables without duplicate names come back unchanged in value.
pub fn sum_duplicate_columns(table: &TimeTable) -> TimeTable {
    let mut out = TimeTable::new(table.index().to_vec());
    let mut seen: Vec<String> = Vec::new();
    for column in table.columns() {
        if seen.contains(&column.name) {
            continue;
        }
        seen.push(column.name.clone());
        let mut sum = vec![0.0; table.num_rows()];
        for other in table.columns().iter().filter(|c| c.name == column.name) {
            for (acc, v) in sum.iter_mut().zip(&other.values) {
                *acc += v;
            }
        }
        out.push_column(column.name.clone(), sum)
            .expect("summed column matches its own index");
    }
    out
}

/// Build the system-wide table from per-region tables: column-wise
/// concatenation, then duplicate names collapse into a column-wise sum.
/// An empty mapping yields an empty table.
pub fn sum_region_tables(
    data: &BTreeMap<String, TimeTable>,
) -> Result<TimeTable, DataError> {
    let mut combined: Option<TimeTable> = None;
    for (region, table) in data {
        match combined {
            None => combined = Some(table.clone()),
            Some(ref mut acc) => {
                if acc.index() != table.index() {
                    return Err(DataError::IndexMismatch {
                        context: format!("region tables (at region '{}')", region),
                    });
                }
                for column in table.columns() {
                    acc.push_column(column.name.clone(), column.values.clone())?;
                }
            }
        }
    }
    Ok(combined.map(|t| sum_duplicate_columns(&t)).unwrap_or_default())
}

/// System-wide trade: imports and exports aggregated independently, the
/// two-part shape preserved.
pub fn sum_region_trade(
    data: &BTreeMap<String, TradeTable>,
) -> Result<TradeTable, DataError> {
    let imports: BTreeMap<String, TimeTable> = data
        .iter()
        .map(|(region, trade)| (region.clone(), trade.imports.clone()))
        .collect();
    let exports: BTreeMap<String, TimeTable> = data
        .iter()
        .map(|(region, trade)| (region.clone(), trade.exports.clone()))
        .collect();
    Ok(TradeTable {
        imports: sum_region_tables(&imports)?,
        exports: sum_region_tables(&exports)?,
    })
}

/// The synthetic "system" slice of a result: the sum over all regions.
pub fn system_total(data: &ResultData) -> Result<RegionData, DataError> {
    match data {
        ResultData::Series(map) => Ok(RegionData::Series(sum_region_tables(map)?)),
        ResultData::Trade(map) => Ok(RegionData::Trade(sum_region_trade(map)?)),
    }
}

/// Collapse duplicate columns and apply the unit conversion, for either shape.
pub fn prepare(data: &RegionData, converter: f64) -> RegionData {
    match data {
        RegionData::Series(table) => {
            RegionData::Series(sum_duplicate_columns(table).scale(converter))
        }
        RegionData::Trade(trade) => RegionData::Trade(TradeTable {
            imports: sum_duplicate_columns(&trade.imports).scale(converter),
            exports: sum_duplicate_columns(&trade.exports).scale(converter),
        }),
    }
}
