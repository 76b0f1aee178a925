use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use legend_config::Config;

/// Load a JSON profile, or the defaults when no path is given.
/// Environment overrides apply on top of either.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading profile {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open profile {}", path.display()))?;
    let mut config: Config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse profile {}", path.display()))?;

    config.apply_env();
    Ok(config)
}
