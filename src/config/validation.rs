use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.query_limit == 0 {
        errors.push("query_limit: must be at least 1".to_string());
    }

    if config.tick_rate_ms == 0 {
        errors.push("tick_rate_ms: must be at least 1".to_string());
    }

    if let Some(ref path) = config.store_path {
        if path.as_os_str().is_empty() {
            errors.push("store_path: must not be empty".to_string());
        } else if path.is_dir() {
            errors.push(format!(
                "store_path: '{}' is a directory, expected a file path",
                path.display()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
