//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VoyantConfig;
use crate::domain::errors::VoyantError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix of environment overrides, as in `VOYANT_EXPORT_CONCURRENCY`
pub const ENV_PREFIX: &str = "VOYANT";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`VoyantConfig`]
/// 4. Applies environment variable overrides (`VOYANT_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`VoyantError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use voyant_export::config::loader::load_config;
///
/// let config = load_config("voyant.toml")?;
/// println!("Library: {}", config.catalog.library_path.display());
/// # Ok::<(), voyant_export::domain::VoyantError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VoyantConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VoyantError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VoyantError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Like [`load_config`], but a missing file yields the defaults
///
/// Environment overrides and validation still apply.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<VoyantConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = VoyantConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<VoyantConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VoyantConfig = toml::from_str(&contents)
        .map_err(|e| VoyantError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &VoyantConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| VoyantError::Configuration(format!("Configuration validation failed: {e}")))
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VoyantError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VoyantError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn parsed_override<T: FromStr>(section: &str, key: &str) -> Result<Option<T>> {
    match env_override(section, key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            VoyantError::Configuration(format!(
                "Invalid value '{raw}' in {ENV_PREFIX}_{section}_{key}"
            ))
        }),
    }
}

/// Applies environment variable overrides using the `VOYANT_*` prefix
///
/// Variables follow the pattern `VOYANT_<SECTION>_<KEY>`, for example
/// `VOYANT_CATALOG_COLLECTION` or `VOYANT_EXPORT_RETRY_MAX_ATTEMPTS`.
fn apply_env_overrides(config: &mut VoyantConfig) -> Result<()> {
    // Application
    if let Some(val) = env_override("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Catalog
    if let Some(val) = env_override("CATALOG", "LIBRARY_PATH") {
        config.catalog.library_path = val.into();
    }
    if let Some(val) = env_override("CATALOG", "COLLECTION") {
        config.catalog.collection = Some(val);
    }

    // Export
    if let Some(val) = env_override("EXPORT", "OUTPUT") {
        config.export.output = Some(val.into());
    }
    if let Some(val) = parsed_override("EXPORT", "CONCURRENCY")? {
        config.export.concurrency = val;
    }
    if let Some(val) = env_override("EXPORT", "TEMP_DIR") {
        config.export.temp_dir = Some(val.into());
    }
    if let Some(val) = parsed_override("EXPORT", "RETRY_MAX_ATTEMPTS")? {
        config.export.retry.max_attempts = val;
    }
    if let Some(val) = parsed_override("EXPORT", "RETRY_INITIAL_DELAY_MS")? {
        config.export.retry.initial_delay_ms = val;
    }
    if let Some(val) = parsed_override("EXPORT", "RETRY_BACKOFF_MULTIPLIER")? {
        config.export.retry.backoff_multiplier = val;
    }
    if let Some(val) = parsed_override("EXPORT", "RETRY_MAX_DELAY_MS")? {
        config.export.retry.max_delay_ms = val;
    }

    // Logging
    if let Some(val) = parsed_override("LOGGING", "LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING", "LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VOYANT_TEST_LIBRARY_DIR", "/srv/library");
        let input = "library_path = \"${VOYANT_TEST_LIBRARY_DIR}/library.json\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "library_path = \"/srv/library/library.json\"\n");
        std::env::remove_var("VOYANT_TEST_LIBRARY_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VOYANT_TEST_MISSING_VAR");
        let input = "output = \"${VOYANT_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VOYANT_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# output = \"${VOYANT_TEST_NEVER_SET}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-voyant.toml");
        assert!(matches!(result, Err(VoyantError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent-voyant.toml").unwrap();
        assert_eq!(config.export.retry.max_attempts, 3);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[catalog]
library_path = "/data/library.json"
collection = "Thesis sources"

[export]
output = "thesis.zip"
concurrency = 8

[export.retry]
max_attempts = 5
initial_delay_ms = 200
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.catalog.collection.as_deref(), Some("Thesis sources"));
        assert_eq!(config.export.concurrency, 8);
        assert_eq!(config.export.retry.max_attempts, 5);
        assert_eq!(config.export.retry.initial_delay_ms, 200);
        assert_eq!(config.export.retry.max_delay_ms, 30000);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let err = parse_config("[export]\nconcurrency = 0\n").unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_parse_config_rejects_bad_toml() {
        assert!(matches!(
            parse_config("[export\n"),
            Err(VoyantError::Configuration(_))
        ));
    }
}
