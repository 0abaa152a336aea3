use crate::error::{Result, ScoreError};
use crate::types::config::BrrConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "brr.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".brr/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/brr-score/config.toml";

/// Loads the layered config for a workbook living in `root`.
///
/// Layers, lowest priority first: global, `brr.toml`, `.brr/local.toml`, then
/// the explicit `--config` file. Missing layers are skipped; with no layer at
/// all the survey defaults apply.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<BrrConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref(), explicit)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<BrrConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ScoreError::ConfigNotFound(path.display().to_string()));
        }
    }

    let mut merged = Value::Table(Map::new());
    let mut layers = 0;
    if let Some(path) = global_path {
        layers += merge_file_if_exists(&mut merged, path)? as usize;
    }
    layers += merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))? as usize;
    layers += merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))? as usize;
    if let Some(path) = explicit {
        layers += merge_file_if_exists(&mut merged, path)? as usize;
    }
    tracing::debug!(layers, root = %root.display(), "config layers merged");

    let cfg: BrrConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
