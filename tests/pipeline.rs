//! End-to-end run: build a small solved network, write it to disk, load it
//! back, and generate every requested chart into a temporary directory.

use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::tempdir;

use gasgrid::core::runner::{generate_charts, RunOptions};
use gasgrid::data::network_loader::load_network;
use gasgrid::models::network::{Bus, GasNetwork, Load, Pipeline, Processor};
use gasgrid::models::table::Snapshot;

fn fixture_network() -> GasNetwork {
    let mut snapshots = Vec::new();
    for period in [2030u32, 2040] {
        for hour in [0u32, 6, 12, 18] {
            snapshots.push(Snapshot::new(
                period,
                NaiveDate::from_ymd_opt(2030, 1, 1)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
            ));
        }
    }
    let n = snapshots.len();

    GasNetwork {
        name: "fixture".into(),
        snapshots,
        buses: vec![
            Bus {
                name: "CA gas".into(),
                region: "CA".into(),
                country: "US".into(),
                marginal_price: vec![25.0; n],
            },
            Bus {
                name: "TX gas".into(),
                region: "TX".into(),
                country: "US".into(),
                marginal_price: vec![20.0; n],
            },
        ],
        loads: vec![
            Load {
                name: "CA demand".into(),
                bus: "CA gas".into(),
                p: vec![10.0; n],
            },
            Load {
                name: "TX demand".into(),
                bus: "TX gas".into(),
                p: vec![12.0; n],
            },
        ],
        processors: vec![Processor {
            name: "TX plant".into(),
            bus: "TX gas".into(),
            p: vec![22.0; n],
        }],
        stores: vec![],
        pipelines: vec![Pipeline {
            name: "TX-CA".into(),
            bus0: "TX gas".into(),
            bus1: "CA gas".into(),
            p: vec![5.0; n],
        }],
    }
}

#[test]
fn generates_requested_charts_and_skips_the_rest() {
    let dir = tempdir().unwrap();
    let network_path = dir.path().join("network.json");
    serde_json::to_writer(File::create(&network_path).unwrap(), &fixture_network()).unwrap();

    let network = load_network(&network_path).unwrap();

    let root = dir.path().join("figures");
    let outputs: Vec<PathBuf> = ["demand", "fuel_price", "storage"]
        .iter()
        .map(|name| root.join("system").join("natural_gas").join(format!("{}.png", name)))
        .collect();

    let summary = generate_charts(&network, &outputs, &RunOptions { export_csv: true }).unwrap();

    // Three of the seven known result types were requested.
    assert_eq!(summary.results_skipped, 4);

    // demand: 3 regions x (headline + 12 monthly) = 39
    // fuel_price: 3 regions x headline (no monthly flag) = 3
    // storage: no stores in the network, so only the system aggregate = 13
    assert_eq!(summary.figures_written, 39 + 3 + 13);
    assert_eq!(summary.regions_skipped, 2);

    for region in ["CA", "TX", "system"] {
        let region_dir = root.join(region).join("natural_gas");
        assert!(region_dir.join("demand.png").exists());
        assert!(region_dir.join("fuel_price.png").exists());
        assert!(region_dir.join("demand").join("January.png").exists());
        assert!(region_dir.join("demand").join("December.png").exists());
        // CSV export rides along with the headline figure.
        assert!(region_dir.join("demand.csv").exists());
        // fuel_price is not flagged for monthly detail.
        assert!(!region_dir.join("fuel_price").exists());
    }

    // The empty storage result still populates its system path.
    let storage = root.join("system").join("natural_gas").join("storage.png");
    assert!(storage.exists());
    assert!(std::fs::metadata(&storage).unwrap().len() > 0);
    // But regions without storage data are skipped, not faked.
    assert!(!root.join("CA").join("natural_gas").join("storage.png").exists());
}

#[test]
fn trade_results_render_paired_panels() {
    let dir = tempdir().unwrap();
    let network = fixture_network();

    let root = dir.path().join("figures");
    let outputs = vec![root
        .join("system")
        .join("natural_gas")
        .join("domestic_trade.png")];

    let summary = generate_charts(&network, &outputs, &RunOptions::default()).unwrap();
    assert_eq!(summary.results_skipped, 6);

    for region in ["CA", "TX", "system"] {
        let region_dir = root.join(region).join("natural_gas");
        assert!(region_dir.join("domestic_trade.png").exists());
        assert!(region_dir
            .join("domestic_trade")
            .join("June.png")
            .exists());
    }
}

#[test]
fn rerunning_overwrites_deterministically() {
    let dir = tempdir().unwrap();
    let network = fixture_network();
    let root = dir.path().join("figures");
    let outputs = vec![root.join("system").join("natural_gas").join("fuel_price.png")];

    let first = generate_charts(&network, &outputs, &RunOptions::default()).unwrap();
    let second = generate_charts(&network, &outputs, &RunOptions::default()).unwrap();
    assert_eq!(first, second);
    assert!(root.join("CA").join("natural_gas").join("fuel_price.png").exists());
}
