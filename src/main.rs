use std::error::Error;

use clap::Parser;

use gasgrid::cli::cli::Args;
use gasgrid::core::runner::{self, RunOptions};
use gasgrid::data::network_loader::load_network;
use gasgrid::utils::logging;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    logging::init_logging(args.debug_logging());

    println!("Natural Gas Network Chart Generator");
    println!(
        "Debug logging: {}, CSV export: {}",
        if args.debug_logging() { "enabled" } else { "disabled" },
        if args.export_csv() { "enabled" } else { "disabled" }
    );

    let network = load_network(args.network())?;

    let options = RunOptions {
        export_csv: args.export_csv(),
    };
    let summary = runner::generate_charts(&network, args.outputs(), &options)?;

    println!(
        "Wrote {} figures ({} result types skipped, {} regions skipped)",
        summary.figures_written, summary.results_skipped, summary.regions_skipped
    );

    Ok(())
}
