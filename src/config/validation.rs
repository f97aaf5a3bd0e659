//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn check_url(field: &'static str, raw: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field,
            message: format!("unsupported scheme '{}' in {}", url.scheme(), raw),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("invalid URL '{}': {}", raw, e),
        }),
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("rpc.url", &config.rpc.url, &mut errors);
    for url in &config.rpc.failover_urls {
        check_url("rpc.failover_urls", url, &mut errors);
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.chain.chain_id.trim().is_empty() {
        errors.push(ValidationError {
            field: "chain.chain_id",
            message: "must not be empty".to_string(),
        });
    }

    if config.chain.default_msg_type.trim().is_empty() {
        errors.push(ValidationError {
            field: "chain.default_msg_type",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.rpc.url = "not a url".to_string();
        config.rpc.failover_urls.push("ftp://node:21".to_string());
        config.rpc.timeout_secs = 0;
        config.chain.chain_id = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["rpc.url", "rpc.failover_urls", "rpc.timeout_secs", "chain.chain_id"]
        );
    }
}
