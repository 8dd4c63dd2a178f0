use anyhow::{Context, Result, anyhow};
use denoport_core::BuildOptions;
use log::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "denoport.config.json";

/// Returns the path of the config file in `dir` if one exists.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    debug!("Checking for config file at {}", candidate.display());
    candidate.is_file().then_some(candidate)
}

/// Loads build options from `path`, or from `denoport.config.json` in
/// `project_root` when no explicit path is given.
pub fn load_options(project_root: &Path, path: Option<&Path>) -> Result<BuildOptions> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config_file(project_root).ok_or_else(|| {
            anyhow!(
                "Missing configuration file: add {} to {} or pass --config",
                CONFIG_FILE_NAME,
                project_root.display()
            )
        })?,
    };

    debug!("Reading configuration from {}", config_path.display());
    let data = fs::read_to_string(&config_path)
        .with_context(|| format!("Error reading config file {}", config_path.display()))?;
    let options: BuildOptions = serde_json::from_str(&data)
        .with_context(|| format!("Error parsing config file {}", config_path.display()))?;
    Ok(options)
}
