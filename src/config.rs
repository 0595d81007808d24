use crate::error::{AssessError, Result};
use crate::types::config::AssessConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "assess.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".assess/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/assess/config.toml";

/// Loads and validates the config for a site root. `None` when the root has
/// no `assess.toml`.
pub fn load_config(root: &Path) -> Result<Option<AssessConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<AssessConfig>> {
    let site_path = root.join(DEFAULT_CONFIG_FILE);
    if !site_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &site_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: AssessConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| AssessError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AssessError::ConfigParse(format!("{}: {}", path.display(), e)))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::PracticalRule;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_site_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_site_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[logging]
level = "info"

[storage]
data_dir = "/srv/assessments"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring]
practical_rule = "performance_only"

[storage]
data_dir = "floor-data"
"#,
        )
        .expect("site config should write");

        fs::create_dir_all(root.path().join(".assess")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[scoring]
apply_overrides = false
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert_eq!(cfg.practical_rule(), PracticalRule::PerformanceOnly);
        assert!(!cfg.apply_overrides());
        assert_eq!(cfg.data_dir(), "floor-data");
        assert_eq!(cfg.log_level(), "info");
    }

    #[test]
    fn load_config_rejects_invalid_weights() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[scoring.weights]
practical = 0.50
"#,
        )
        .expect("site config should write");

        let err = load_config_with_global(root.path(), None).expect_err("should reject");
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn load_config_reports_file_on_syntax_error() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[scoring\n")
            .expect("site config should write");

        let err = load_config_with_global(root.path(), None).expect_err("should reject");
        assert!(err.to_string().contains("assess.toml"));
    }
}
