//! Config command implementation

use super::GlobalArgs;
use crate::config_loader::{load_config_with_overrides, resolve_config_path};
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;

pub fn execute(globals: &GlobalArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(globals.config.as_deref(), globals.overrides())?;

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Configuration Values");
    if let Some(path) = resolve_config_path(globals.config.as_deref()) {
        output.kv("File", path.display());
    }
    output.table(rows)?;

    output.section("Configuration Precedence");
    if !output.is_json() {
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
