use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Solved gas network results file (JSON)")]
    network: PathBuf,

    #[arg(
        required = true,
        help = "Requested figure paths, one per result type, shaped <root>/<region>/<category>/<result>.png"
    )]
    outputs: Vec<PathBuf>,

    #[arg(long, default_value_t = false, help = "Also write each plotted table as CSV")]
    export_csv: bool,

    #[arg(long, default_value_t = false, help = "Enable debug logging")]
    debug_logging: bool,
}

impl Args {
    pub fn network(&self) -> &PathBuf {
        &self.network
    }

    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
