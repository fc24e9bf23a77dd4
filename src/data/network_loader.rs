//! Loading and validating the solved network results file.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::models::network::GasNetwork;

#[derive(Debug)]
pub enum NetworkLoadError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    SeriesLength {
        component: String,
        expected: usize,
        actual: usize,
    },
    UnknownBus {
        component: String,
        bus: String,
    },
}

impl From<std::io::Error> for NetworkLoadError {
    fn from(err: std::io::Error) -> Self {
        NetworkLoadError::IoError(err)
    }
}

impl From<serde_json::Error> for NetworkLoadError {
    fn from(err: serde_json::Error) -> Self {
        NetworkLoadError::ParseError(err)
    }
}

impl fmt::Display for NetworkLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkLoadError::IoError(e) => write!(f, "IO error: {}", e),
            NetworkLoadError::ParseError(e) => write!(f, "JSON error: {}", e),
            NetworkLoadError::SeriesLength {
                component,
                expected,
                actual,
            } => write!(
                f,
                "component '{}' carries {} values but the network has {} snapshots",
                component, actual, expected
            ),
            NetworkLoadError::UnknownBus { component, bus } => {
                write!(f, "component '{}' references unknown bus '{}'", component, bus)
            }
        }
    }
}

impl std::error::Error for NetworkLoadError {}

/// Read a solved network from a JSON results file and validate that every
/// component series lines up with the snapshot index and references a real bus.
pub fn load_network(path: impl AsRef<Path>) -> Result<GasNetwork, NetworkLoadError> {
    let file = File::open(path.as_ref())?;
    let network: GasNetwork = serde_json::from_reader(BufReader::new(file))?;
    validate(&network)?;
    info!(
        buses = network.buses.len(),
        loads = network.loads.len(),
        processors = network.processors.len(),
        stores = network.stores.len(),
        pipelines = network.pipelines.len(),
        snapshots = network.snapshots.len(),
        "loaded gas network '{}'",
        network.name
    );
    Ok(network)
}

fn check_len(component: &str, actual: usize, expected: usize) -> Result<(), NetworkLoadError> {
    if actual != expected {
        return Err(NetworkLoadError::SeriesLength {
            component: component.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_bus(network: &GasNetwork, component: &str, bus: &str) -> Result<(), NetworkLoadError> {
    if network.bus(bus).is_none() {
        return Err(NetworkLoadError::UnknownBus {
            component: component.to_string(),
            bus: bus.to_string(),
        });
    }
    Ok(())
}

fn validate(network: &GasNetwork) -> Result<(), NetworkLoadError> {
    let expected = network.snapshots.len();
    for bus in &network.buses {
        check_len(&bus.name, bus.marginal_price.len(), expected)?;
    }
    for load in &network.loads {
        check_len(&load.name, load.p.len(), expected)?;
        check_bus(network, &load.name, &load.bus)?;
    }
    for proc in &network.processors {
        check_len(&proc.name, proc.p.len(), expected)?;
        check_bus(network, &proc.name, &proc.bus)?;
    }
    for store in &network.stores {
        check_len(&store.name, store.e.len(), expected)?;
        check_bus(network, &store.name, &store.bus)?;
    }
    for pipeline in &network.pipelines {
        check_len(&pipeline.name, pipeline.p.len(), expected)?;
        check_bus(network, &pipeline.name, &pipeline.bus0)?;
        check_bus(network, &pipeline.name, &pipeline.bus1)?;
    }
    Ok(())
}
