//! Optional CSV dump of every table that gets rendered, written next to the
//! figure with the same stem. Off by default; enabled with `--export-csv`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::models::table::{TimeTable, TradeTable};

const TIMESTEP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn csv_path(figure_path: &Path, suffix: Option<&str>) -> PathBuf {
    let stem = figure_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    let name = match suffix {
        Some(suffix) => format!("{}_{}.csv", stem, suffix),
        None => format!("{}.csv", stem),
    };
    figure_path.with_file_name(name)
}

fn write_table(table: &TimeTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["period".to_string(), "timestep".to_string()];
    header.extend(table.column_names().iter().map(|s| s.to_string()));
    writer.write_record(&header)?;

    for (row, snapshot) in table.index().iter().enumerate() {
        let mut record = vec![
            snapshot.period.to_string(),
            snapshot.timestep.format(TIMESTEP_FORMAT).to_string(),
        ];
        record.extend(table.columns().iter().map(|c| c.values[row].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    debug!("wrote table data to {}", path.display());
    Ok(())
}

/// Write the rendered series next to its figure as `<stem>.csv`.
pub fn export_table(table: &TimeTable, figure_path: &Path) -> Result<PathBuf> {
    let path = csv_path(figure_path, None);
    write_table(table, &path)?;
    Ok(path)
}

/// Write the rendered trade pair as `<stem>_imports.csv` / `<stem>_exports.csv`.
pub fn export_trade(trade: &TradeTable, figure_path: &Path) -> Result<(PathBuf, PathBuf)> {
    let imports = csv_path(figure_path, Some("imports"));
    let exports = csv_path(figure_path, Some("exports"));
    write_table(&trade.imports, &imports)?;
    write_table(&trade.exports, &exports)?;
    Ok((imports, exports))
}
