//! Sensor YAML parsing with environment variable substitution.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::types::VigilConfig;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var regex"));

/// Substitute `${VAR_NAME}` patterns with environment variable values.
///
/// # Errors
///
/// Returns an error if any referenced environment variable is not set.
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in ENV_VAR_RE.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("Missing environment variable(s): {}", errors.join(", "));
    }

    Ok(result)
}

/// Parse a sensor-definitions YAML string (after env var substitution).
///
/// # Errors
///
/// Returns an error if env var substitution fails or the YAML is invalid.
pub fn parse_config_str(yaml_str: &str) -> Result<VigilConfig> {
    let substituted = substitute_env_vars(yaml_str)?;
    let config: VigilConfig =
        serde_yaml::from_str(&substituted).context("Failed to parse sensor definitions YAML")?;
    Ok(config)
}

/// Parse a sensor-definitions YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is invalid.
pub fn parse_config(path: &Path) -> Result<VigilConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read definitions file: {}", path.display()))?;
    parse_config_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_substitution() {
        std::env::set_var("VG_TEST_DATA_DIR", "/srv/data");
        let input = "path: ${VG_TEST_DATA_DIR}/raw.csv";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path: /srv/data/raw.csv");
        std::env::remove_var("VG_TEST_DATA_DIR");
    }

    #[test]
    fn no_env_vars_passthrough() {
        let input = "name: raw_transactions_sensor";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn missing_env_vars_all_reported() {
        let input = "${VG_MISSING_X} and ${VG_MISSING_Y}";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("VG_MISSING_X"));
        assert!(err.contains("VG_MISSING_Y"));
    }

    #[test]
    fn parse_config_from_string() {
        std::env::set_var("VG_TEST_WATCH_PATH", "/data/raw_transactions.csv");
        let yaml = r#"
version: "1.0"
sensors:
  - name: raw_transactions_sensor
    assets: [raw/transactions]
    probe:
      kind: file_modified
      path: ${VG_TEST_WATCH_PATH}
"#;
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(
            config.sensors[0].probe,
            crate::config::ProbeConfig::FileModified {
                path: "/data/raw_transactions.csv".into()
            }
        );
        std::env::remove_var("VG_TEST_WATCH_PATH");
    }

    #[test]
    fn parse_invalid_yaml_errors() {
        let yaml = "this is not: [valid: yaml: {{{}}}";
        assert!(parse_config_str(yaml).is_err());
    }

    #[test]
    fn parse_config_file_not_found() {
        let err = parse_config(Path::new("/nonexistent/vigil.yaml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read definitions file"));
    }
}
