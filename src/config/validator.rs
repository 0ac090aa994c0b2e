//! Configuration validation rules.
//!
//! - `batch_size` must be at least 1
//! - the `dist-info` registry needs at least one `site_packages` directory
//! - a submodule needs a non-empty url and path
//! - the interpreter must be named

use crate::config::schema::{RegistryKind, SyncConfig};
use crate::error::{Result, SyncError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &SyncConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.batch_size == 0 {
        errors.push(ValidationError::new(
            "batch-size",
            "'batch_size' must be at least 1",
        ));
    }

    if config.python.trim().is_empty() {
        errors.push(ValidationError::new("python", "'python' must not be empty"));
    }

    if config.registry == RegistryKind::DistInfo && config.site_packages.is_empty() {
        errors.push(ValidationError::new(
            "site-packages",
            "registry 'dist-info' requires at least one 'site_packages' directory",
        ));
    }

    if let Some(submodule) = &config.submodule {
        if submodule.url.trim().is_empty() || submodule.path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "submodule",
                "'submodule' requires both 'url' and 'path'",
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with all messages joined.
pub fn validate(config: &SyncConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SyncError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
