//! Resolving the requested output paths into the full per-region figure map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

/// {result name -> {region -> figure path}}.
pub type ExpectedFigures = BTreeMap<String, BTreeMap<String, PathBuf>>;

/// Derive the per-region figure paths from the requested output files.
///
/// Each requested path has the shape `<root>/<region>/<category>/<name>.png`;
/// the region component is a template slot, replaced with every known region.
/// Requests too shallow to carry that shape are skipped with a warning.
pub fn expected_figures(outputs: &[PathBuf], regions: &[String]) -> ExpectedFigures {
    let mut expected = ExpectedFigures::new();
    for output in outputs {
        let parts: Vec<&Path> = output.iter().map(Path::new).collect();
        if parts.len() < 3 {
            warn!("output path '{}' is too shallow to resolve, skipping", output.display());
            continue;
        }
        let result = match output.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => {
                warn!("output path '{}' has no file name, skipping", output.display());
                continue;
            }
        };
        // Everything above the '<region>/<category>/<name>.png' tail.
        let root: PathBuf = parts[..parts.len() - 3].iter().collect();
        let category = parts[parts.len() - 2];
        let file_name = parts[parts.len() - 1];

        let mut region_paths = BTreeMap::new();
        for region in regions {
            region_paths.insert(
                region.clone(),
                root.join(region).join(category).join(file_name),
            );
        }
        expected.insert(result, region_paths);
    }
    expected
}

/// Where a monthly detail chart lives: a sub-directory named after the
/// result, one file per month, next to the headline figure.
pub fn monthly_path(figure_path: &Path, result_name: &str, month_name: &str) -> PathBuf {
    let parent = figure_path.parent().unwrap_or_else(|| Path::new(""));
    parent
        .join(result_name)
        .join(format!("{}.png", month_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<String> {
        vec!["CA".to_string(), "TX".to_string(), "system".to_string()]
    }

    #[test]
    fn substitutes_the_region_component() {
        let outputs = vec![PathBuf::from("results/figures/system/natural_gas/demand.png")];
        let expected = expected_figures(&outputs, &regions());
        assert_eq!(expected.len(), 1);
        let demand = &expected["demand"];
        assert_eq!(
            demand["CA"],
            PathBuf::from("results/figures/CA/natural_gas/demand.png")
        );
        assert_eq!(
            demand["system"],
            PathBuf::from("results/figures/system/natural_gas/demand.png")
        );
    }

    #[test]
    fn one_entry_per_requested_result() {
        let outputs = vec![
            PathBuf::from("out/system/natural_gas/demand.png"),
            PathBuf::from("out/system/natural_gas/fuel_price.png"),
            PathBuf::from("out/system/natural_gas/linepack.png"),
        ];
        let expected = expected_figures(&outputs, &regions());
        assert_eq!(expected.len(), 3);
        assert!(expected.contains_key("fuel_price"));
    }

    #[test]
    fn shallow_paths_are_skipped() {
        let outputs = vec![PathBuf::from("demand.png")];
        let expected = expected_figures(&outputs, &regions());
        assert!(expected.is_empty());
    }

    #[test]
    fn monthly_charts_nest_under_the_result_name() {
        let base = PathBuf::from("out/CA/natural_gas/demand.png");
        assert_eq!(
            monthly_path(&base, "demand", "March"),
            PathBuf::from("out/CA/natural_gas/demand/March.png")
        );
    }
}
