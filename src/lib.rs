// Module declarations for the gas network chart generator

// Batch orchestration
pub mod core {
    pub mod runner;
}

// Configuration
pub mod config {
    pub mod constants;
    pub mod plot_spec;
}

// Model definitions
pub mod models {
    pub mod network;
    pub mod table;
}

// Data loading and result accessors
pub mod data {
    pub mod accessors;
    pub mod network_loader;
}

// Aggregation and time reshaping
pub mod analysis {
    pub mod aggregate;
    pub mod months;
    pub mod resample;
}

// Figure rendering
pub mod render {
    pub mod charts;
}

// Output path resolution
pub mod output {
    pub mod layout;
}

// Utility functions
pub mod utils {
    pub mod csv_export;
    pub mod logging;
}

// Command-line interface
pub mod cli {
    pub mod cli;
}
