//! Result accessors: each reads one quantity out of the solved network and
//! returns it tagged as plain series or trade data, keyed by region. The
//! variant is fixed here, at the data-source boundary, and never re-inferred
//! downstream.

use std::collections::BTreeMap;

use crate::models::network::{GasNetwork, StoreKind};
use crate::models::table::{DataError, ResultData, TimeTable, TradeTable};

/// Marginal gas price at each bus, one column per bus.
pub fn gas_price(network: &GasNetwork) -> Result<ResultData, DataError> {
    let index = network.snapshot_index();
    let mut regions: BTreeMap<String, TimeTable> = BTreeMap::new();
    for bus in &network.buses {
        if bus.region.is_empty() {
            continue;
        }
        regions
            .entry(bus.region.clone())
            .or_insert_with(|| TimeTable::new(index.clone()))
            .push_column(bus.name.clone(), bus.marginal_price.clone())?;
    }
    Ok(ResultData::Series(regions))
}

/// Gas withdrawals, one column per load.
pub fn gas_demand(network: &GasNetwork) -> Result<ResultData, DataError> {
    let index = network.snapshot_index();
    let mut regions: BTreeMap<String, TimeTable> = BTreeMap::new();
    for load in &network.loads {
        let bus = network.bus(&load.bus).ok_or_else(|| DataError::UnknownBus {
            component: load.name.clone(),
            bus: load.bus.clone(),
        })?;
        if bus.region.is_empty() {
            continue;
        }
        regions
            .entry(bus.region.clone())
            .or_insert_with(|| TimeTable::new(index.clone()))
            .push_column(load.name.clone(), load.p.clone())?;
    }
    Ok(ResultData::Series(regions))
}

/// Gas processing output, one column per processing facility.
pub fn gas_processing(network: &GasNetwork) -> Result<ResultData, DataError> {
    let index = network.snapshot_index();
    let mut regions: BTreeMap<String, TimeTable> = BTreeMap::new();
    for proc in &network.processors {
        let bus = network.bus(&proc.bus).ok_or_else(|| DataError::UnknownBus {
            component: proc.name.clone(),
            bus: proc.bus.clone(),
        })?;
        if bus.region.is_empty() {
            continue;
        }
        regions
            .entry(bus.region.clone())
            .or_insert_with(|| TimeTable::new(index.clone()))
            .push_column(proc.name.clone(), proc.p.clone())?;
    }
    Ok(ResultData::Series(regions))
}

fn store_levels(network: &GasNetwork, kind: StoreKind) -> Result<ResultData, DataError> {
    let index = network.snapshot_index();
    let mut regions: BTreeMap<String, TimeTable> = BTreeMap::new();
    for store in network.stores.iter().filter(|s| s.kind == kind) {
        let bus = network.bus(&store.bus).ok_or_else(|| DataError::UnknownBus {
            component: store.name.clone(),
            bus: store.bus.clone(),
        })?;
        if bus.region.is_empty() {
            continue;
        }
        regions
            .entry(bus.region.clone())
            .or_insert_with(|| TimeTable::new(index.clone()))
            .push_column(store.name.clone(), store.e.clone())?;
    }
    Ok(ResultData::Series(regions))
}

/// Gas held in the pipeline infrastructure itself.
pub fn linepack(network: &GasNetwork) -> Result<ResultData, DataError> {
    store_levels(network, StoreKind::Linepack)
}

/// Gas held in underground storage facilities.
pub fn underground_storage(network: &GasNetwork) -> Result<ResultData, DataError> {
    store_levels(network, StoreKind::Underground)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TradeScope {
    Domestic,
    International,
}

fn imports_exports(network: &GasNetwork, scope: TradeScope) -> Result<ResultData, DataError> {
    let index = network.snapshot_index();
    let mut regions: BTreeMap<String, TradeTable> = BTreeMap::new();

    for pipeline in &network.pipelines {
        let bus0 = network.bus(&pipeline.bus0).ok_or_else(|| DataError::UnknownBus {
            component: pipeline.name.clone(),
            bus: pipeline.bus0.clone(),
        })?;
        let bus1 = network.bus(&pipeline.bus1).ok_or_else(|| DataError::UnknownBus {
            component: pipeline.name.clone(),
            bus: pipeline.bus1.clone(),
        })?;

        let international = bus0.country != bus1.country;
        let wanted = match scope {
            TradeScope::International => international,
            TradeScope::Domestic => !international && bus0.region != bus1.region,
        };
        if !wanted {
            continue;
        }

        // Flow is signed bus0 -> bus1; the negative part of each direction
        // lands on the opposite side of the trade pair.
        let forward: Vec<f64> = pipeline.p.iter().map(|v| v.max(0.0)).collect();
        let reverse: Vec<f64> = pipeline.p.iter().map(|v| (-v).max(0.0)).collect();

        if !bus1.region.is_empty() {
            let entry = regions
                .entry(bus1.region.clone())
                .or_insert_with(|| TradeTable::new(index.clone()));
            entry.imports.push_column(pipeline.name.clone(), forward.clone())?;
            entry.exports.push_column(pipeline.name.clone(), reverse.clone())?;
        }
        if !bus0.region.is_empty() {
            let entry = regions
                .entry(bus0.region.clone())
                .or_insert_with(|| TradeTable::new(index.clone()));
            entry.exports.push_column(pipeline.name.clone(), forward)?;
            entry.imports.push_column(pipeline.name.clone(), reverse)?;
        }
    }

    Ok(ResultData::Trade(regions))
}

/// Trade between modeled regions of the same country.
pub fn domestic_trade(network: &GasNetwork) -> Result<ResultData, DataError> {
    imports_exports(network, TradeScope::Domestic)
}

/// Trade across a country boundary.
pub fn international_trade(network: &GasNetwork) -> Result<ResultData, DataError> {
    imports_exports(network, TradeScope::International)
}
