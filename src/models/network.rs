use serde::{Deserialize, Serialize};

use super::table::Snapshot;

/// A solved natural-gas network: the shared snapshot index plus the component
/// tables the result accessors read. Deserialized from a JSON results file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasNetwork {
    #[serde(default)]
    pub name: String,
    pub snapshots: Vec<Snapshot>,
    pub buses: Vec<Bus>,
    #[serde(default)]
    pub loads: Vec<Load>,
    #[serde(default)]
    pub processors: Vec<Processor>,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

/// A gas bus. `marginal_price` is the solved dual value per snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bus {
    pub name: String,
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub marginal_price: Vec<f64>,
}

/// Gas withdrawal attached to a bus (MWh per snapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    pub name: String,
    pub bus: String,
    pub p: Vec<f64>,
}

/// Gas processing/production output attached to a bus (MWh per snapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Processor {
    pub name: String,
    pub bus: String,
    pub p: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Gas held in the pipeline infrastructure itself.
    Linepack,
    /// Underground storage facilities.
    Underground,
}

/// Storage state of charge (MWh per snapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub bus: String,
    pub kind: StoreKind,
    pub e: Vec<f64>,
}

/// Directed pipeline between two buses; `p` is the signed flow bus0 -> bus1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub bus0: String,
    pub bus1: String,
    pub p: Vec<f64>,
}

impl GasNetwork {
    /// Distinct non-empty bus regions, sorted. Buses without a region
    /// assignment (trade hubs outside the modeled footprint) are ignored.
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self
            .buses
            .iter()
            .filter(|b| !b.region.is_empty())
            .map(|b| b.region.clone())
            .collect();
        regions.sort();
        regions.dedup();
        regions
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.name == name)
    }

    pub fn snapshot_index(&self) -> Vec<Snapshot> {
        self.snapshots.clone()
    }
}
